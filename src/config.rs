//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::{CategoryDomain, DateBounds, FilterState};
use crate::site::{Page, StaticCredentials};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub registration: RegistrationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard data and chart configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_record_count")]
    pub record_count: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Load records from this CSV file instead of generating them
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_categories() -> Vec<String> {
    CategoryDomain::default().categories().to_vec()
}

fn default_record_count() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_histogram_bins() -> usize {
    20
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            record_count: default_record_count(),
            seed: default_seed(),
            start_date: default_start_date(),
            histogram_bins: default_histogram_bins(),
            data_file: None,
        }
    }
}

impl DashboardConfig {
    /// The configured category domain
    pub fn domain(&self) -> Result<CategoryDomain, ConfigError> {
        CategoryDomain::new(self.categories.iter().cloned())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Default filter: all categories over the generated date range
    pub fn default_filter(&self) -> FilterState {
        FilterState::full_range(self.start_date, self.record_count)
    }

    /// Dates the date widget offers for generated records
    pub fn date_bounds(&self) -> DateBounds {
        let filter = self.default_filter();
        DateBounds::new(filter.start_date, filter.end_date)
    }
}

/// Site shell configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_landing_page")]
    pub landing_page: Page,

    #[serde(default = "default_login_delay")]
    pub login_delay_ms: u64,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

fn default_landing_page() -> Page {
    Page::Home
}

fn default_login_delay() -> u64 {
    1000
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            landing_page: default_landing_page(),
            login_delay_ms: default_login_delay(),
        }
    }
}

impl SiteConfig {
    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::new(self.username.clone(), self.password.clone())
    }
}

/// Registration form configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default = "default_picture_extensions")]
    pub allowed_picture_extensions: Vec<String>,
}

fn default_picture_extensions() -> Vec<String> {
    crate::registration::DEFAULT_PICTURE_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            allowed_picture_extensions: default_picture_extensions(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First existing default location: `./panorama.toml`, then the user
    /// config dir
    pub fn default_path() -> Option<PathBuf> {
        [
            Some(PathBuf::from("./panorama.toml")),
            dirs::config_dir().map(|p| p.join("panorama").join("config.toml")),
        ]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
    }

    /// Load `explicit`, else the first default location, else defaults.
    /// Environment overrides apply in every case.
    ///
    /// A config file that exists but does not load is an error, not a
    /// reason to fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };

        match path {
            Some(path) => {
                let config = Self::load_with_env(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok((Self::from_env(), ConfigSource::Defaults)),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::resolve(None).map(|(config, _)| config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.domain()?;

        if self.dashboard.record_count == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.record_count must be positive".to_string(),
            ));
        }
        if self.dashboard.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.histogram_bins must be positive".to_string(),
            ));
        }
        if self.registration.allowed_picture_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "registration.allowed_picture_extensions cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(seed) = std::env::var("PANORAMA_DASHBOARD_SEED") {
            if let Ok(s) = seed.parse() {
                self.dashboard.seed = s;
            }
        }

        if let Ok(username) = std::env::var("PANORAMA_SITE_USERNAME") {
            self.site.username = username;
        }
        if let Ok(password) = std::env::var("PANORAMA_SITE_PASSWORD") {
            self.site.password = password;
        }

        if let Ok(level) = std::env::var("PANORAMA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PANORAMA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file found; built-in defaults plus environment overrides
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Panorama Configuration
#
# Environment variables override these settings:
# - PANORAMA_DASHBOARD_SEED
# - PANORAMA_SITE_USERNAME
# - PANORAMA_SITE_PASSWORD
# - PANORAMA_LOG_LEVEL
# - PANORAMA_LOG_FORMAT

[dashboard]
# Category domain offered by the category select box
categories = ["A", "B", "C", "D"]

# Number of synthetic daily records
record_count = 100

# Seed for the synthetic generator
seed = 42

# First day of the synthetic data
start_date = "2023-01-01"

# Number of sales histogram bins
histogram_bins = 20

# Load records from a CSV file (date,sales,profit,category) instead
# data_file = "records.csv"

[site]
# Credentials accepted by the login form
username = "admin"
password = "admin"

# Page shown right after login: home, dashboard, profile, about
landing_page = "home"

# Pause after a successful login before re-rendering (ms)
login_delay_ms = 1000

[registration]
# Profile picture extensions the upload accepts
allowed_picture_extensions = ["jpg", "png", "jpeg"]

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
