//! Session state machine
//!
//! Two auth states, `LoggedOut` and `LoggedIn`, plus the current page. The
//! value is owned by the host and threaded through every handler: each
//! handler consumes the old session and returns the next one.
//!
//! There is no `LoggedIn → LoggedOut` transition and no session expiry.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::site::auth::CredentialVerifier;
use crate::site::error::{SiteError, SiteResult};

/// The closed set of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Dashboard,
    Profile,
    About,
}

impl Page {
    /// Every page, in navigation-bar order
    pub const ALL: [Page; 4] = [Page::Home, Page::Dashboard, Page::Profile, Page::About];

    /// Navigation button label
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::Profile => "Profile",
            Page::About => "About",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Dashboard => write!(f, "dashboard"),
            Page::Profile => write!(f, "profile"),
            Page::About => write!(f, "about"),
        }
    }
}

impl FromStr for Page {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Page::Home),
            "dashboard" => Ok(Page::Dashboard),
            "profile" => Ok(Page::Profile),
            "about" => Ok(Page::About),
            _ => Err(SiteError::UnknownPage(s.to_string())),
        }
    }
}

/// Authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

/// Result of a login attempt
///
/// `Rejected` does not say which field was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    Accepted,
    Rejected,
    AlreadyLoggedIn,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Accepted => "Login successful!",
            LoginOutcome::Rejected => "Invalid username or password",
            LoginOutcome::AlreadyLoggedIn => "Already logged in",
        }
    }
}

/// Per-session state of the site shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    auth: AuthState,
    current_page: Page,
}

impl SessionState {
    /// Fresh, logged-out session that will open on `landing_page`
    pub fn new(landing_page: Page) -> Self {
        Self {
            auth: AuthState::LoggedOut,
            current_page: landing_page,
        }
    }

    pub fn auth(&self) -> AuthState {
        self.auth
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth == AuthState::LoggedIn
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Submit the login form
    pub fn login(
        self,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> (Self, LoginOutcome) {
        if self.is_logged_in() {
            return (self, LoginOutcome::AlreadyLoggedIn);
        }

        if verifier.verify(username, password) {
            tracing::info!(username, "Login accepted");
            (
                Self {
                    auth: AuthState::LoggedIn,
                    ..self
                },
                LoginOutcome::Accepted,
            )
        } else {
            tracing::warn!("Login rejected");
            (self, LoginOutcome::Rejected)
        }
    }

    /// Click a navigation button
    pub fn navigate(self, page: Page) -> SiteResult<Self> {
        if !self.is_logged_in() {
            return Err(SiteError::NotAuthenticated);
        }

        tracing::debug!(from = %self.current_page, to = %page, "Navigate");
        Ok(Self {
            current_page: page,
            ..self
        })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Page::Home)
    }
}
