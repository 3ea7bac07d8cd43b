//! Panorama launcher
//!
//! Stands in for the host UI: reads widget values from the command line
//! (or stdin for the site shell), runs one render pass per interaction and
//! prints the render instructions.
//!
//! - `panorama dashboard` - filter and chart the sales records
//! - `panorama site` - interactive login-gated site shell
//! - `panorama register` - submit the registration form
//! - `panorama config` - print the default config file

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panorama::config::{generate_default_config, Config, LoggingConfig};
use panorama::dashboard::{
    write_csv, CategoryFilter, CsvProvider, Dashboard, DashboardView, DataProvider, DateBounds,
    FilterState, SyntheticProvider,
};
use panorama::registration::{
    submit, ProfilePicture, RegistrationError, RegistrationForm, SubmissionOutcome,
};
use panorama::site::{LoginOutcome, Page, PageContent, Site, SiteBody, SiteView};

#[derive(Parser)]
#[command(name = "panorama")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard, site shell and registration form demos")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./panorama.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// Filtered records (dashboard only)
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard for one filter selection
    Dashboard {
        /// Category, or "All"
        #[arg(short, long, default_value = "All")]
        category: String,
        /// First day (YYYY-MM-DD), within the data range; default: first day
        #[arg(long)]
        start: Option<String>,
        /// Last day (YYYY-MM-DD), within the data range; default: last day
        #[arg(long)]
        end: Option<String>,
        /// Read records from a CSV file instead of generating them
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Run the site shell; reads one action per line from stdin
    Site,

    /// Submit the registration form
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// YYYY-MM-DD, default: today
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long, default_value = "Select...")]
        gender: String,
        #[arg(long, default_value = "Student")]
        occupation: String,
        /// Repeat for several interests
        #[arg(long = "interest")]
        interests: Vec<String>,
        #[arg(long, default_value = "Select...")]
        country: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        about: String,
        /// Profile picture file (jpg, png, jpeg)
        #[arg(long)]
        picture: Option<PathBuf>,
        #[arg(long)]
        accept_terms: bool,
        #[arg(long)]
        newsletter: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (config, source) = Config::resolve(cli.config.as_deref())?;

    init_tracing(&config.logging);
    tracing::debug!("Panorama v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(%source, "Configuration loaded");

    if cli.format == OutputFormat::Csv && !matches!(cli.command, Commands::Dashboard { .. }) {
        bail!("csv output is only available for the dashboard");
    }

    match cli.command {
        Commands::Dashboard {
            category,
            start,
            end,
            data,
        } => run_dashboard(&config, cli.format, &category, start, end, data),
        Commands::Site => run_site(&config, cli.format),
        Commands::Register {
            name,
            email,
            phone,
            birth_date,
            gender,
            occupation,
            interests,
            country,
            city,
            about,
            picture,
            accept_terms,
            newsletter,
        } => {
            let birth_date = match birth_date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|_| RegistrationError::InvalidDate(s.clone()))?,
                None => chrono::Local::now().date_naive(),
            };

            let profile_picture = match picture {
                Some(path) => {
                    let bytes = std::fs::read(&path).map_err(RegistrationError::from)?;
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    Some(ProfilePicture::from_upload(
                        file_name,
                        bytes,
                        &config.registration.allowed_picture_extensions,
                    )?)
                }
                None => None,
            };

            let form = RegistrationForm {
                full_name: name,
                email,
                phone,
                birth_date,
                gender,
                occupation,
                interests,
                country,
                city,
                about_me: about,
                profile_picture,
                terms_accepted: accept_terms,
                newsletter_opt_in: newsletter,
            };

            print_submission(&submit(&form), cli.format)
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Install the tracing subscriber; logs go to stderr, render output to stdout
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("panorama={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn run_dashboard(
    config: &Config,
    format: OutputFormat,
    category: &str,
    start: Option<String>,
    end: Option<String>,
    data: Option<PathBuf>,
) -> anyhow::Result<()> {
    let domain = config.dashboard.domain()?;

    // The date widget only offers days the data covers
    let (provider, bounds) = match data.or_else(|| config.dashboard.data_file.clone()) {
        Some(path) => {
            let csv = CsvProvider::from_path(&path, &domain)?;
            let bounds = DateBounds::of_records(csv.records());
            let provider: Arc<dyn DataProvider> = Arc::new(csv);
            (provider, bounds)
        }
        None => {
            let provider: Arc<dyn DataProvider> = Arc::new(SyntheticProvider::generate(
                &domain,
                config.dashboard.start_date,
                config.dashboard.record_count,
                config.dashboard.seed,
            ));
            (provider, Some(config.dashboard.date_bounds()))
        }
    };

    let defaults = match bounds {
        Some(bounds) => FilterState::within(bounds),
        None => config.dashboard.default_filter(),
    };
    let start_date = pick_date(start, defaults.start_date, bounds)?;
    let end_date = pick_date(end, defaults.end_date, bounds)?;
    let filter = FilterState::new(CategoryFilter::parse(category, &domain)?, start_date, end_date);

    let dashboard = Dashboard::new(provider, domain, config.dashboard.histogram_bins);

    match format {
        OutputFormat::Csv => {
            let records = dashboard.filtered_records(&filter)?;
            let borrowed: Vec<_> = records.iter().collect();
            write_csv(io::stdout().lock(), &borrowed)?;
        }
        OutputFormat::Json => {
            let view = dashboard.render(&filter)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            let view = dashboard.render(&filter)?;
            println!("Interactive Dashboard");
            println!(
                "Category: {}  Dates: {} .. {}  Options: {}",
                filter.category,
                filter.start_date,
                filter.end_date,
                dashboard.domain().options().join(" | ")
            );
            print_dashboard(&view);
        }
    }

    Ok(())
}

/// Date-input value: parsed, and inside the bounds when there are any
fn pick_date(
    input: Option<String>,
    fallback: NaiveDate,
    bounds: Option<DateBounds>,
) -> anyhow::Result<NaiveDate> {
    let Some(input) = input else {
        return Ok(fallback);
    };

    let date = FilterState::parse_date(&input)?;
    match bounds {
        Some(bounds) => Ok(bounds.check(date)?),
        None => Ok(date),
    }
}

fn print_dashboard(view: &DashboardView) {
    let charts = match view {
        DashboardView::Empty { notice } => {
            println!("\nWARNING: {}", notice);
            return;
        }
        DashboardView::Charts { charts, .. } => charts,
    };

    println!("\n== {} ==", charts.line.title);
    for point in &charts.line.data {
        println!("  {}  {:>5}", point.date, point.value);
    }

    println!("\n== {} ==", charts.bar.title);
    for row in &charts.bar.data {
        println!("  {:<10} {:>8.2}  (n={})", row.category, row.mean, row.count);
    }

    println!("\n== {} ==", charts.scatter.title);
    for point in &charts.scatter.data {
        println!(
            "  sales={:>5} profit={:>4}  {} {}",
            point.sales, point.profit, point.category, point.color
        );
    }

    println!("\n== {} ==", charts.histogram.title);
    for bin in &charts.histogram.data {
        println!(
            "  [{:>7.1}, {:>7.1}] {:>3} {}",
            bin.lower,
            bin.upper,
            bin.count,
            "#".repeat(bin.count)
        );
    }

    println!("\n== {} ==", charts.pie.title);
    for share in &charts.pie.data {
        println!(
            "  {:<10} {:>4}  {:>5.1}%",
            share.category,
            share.count,
            share.share * 100.0
        );
    }

    println!(
        "\n== {} ==\n  {} points, same series as \"{}\"",
        charts.area.title,
        charts.area.data.len(),
        charts.line.title
    );
}

fn run_site(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let site = Site::new(
        Arc::new(config.site.credentials()),
        config.site.landing_page,
        Duration::from_millis(config.site.login_delay_ms),
    );

    let mut session = site.start_session();
    print_site(&site.render(&session), format)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some("login") => {
                let username = parts.next().unwrap_or("");
                let password = parts.next().unwrap_or("");
                let (next, outcome) = site.login(session, username, password);
                session = next;
                println!("{}", outcome.message());
                if outcome == LoginOutcome::Accepted {
                    std::thread::sleep(site.login_delay());
                }
            }
            Some(command) => match command.parse::<Page>() {
                Ok(page) => match site.navigate(session, page) {
                    Ok(next) => session = next,
                    Err(e) => println!("{}", e),
                },
                Err(_) => {
                    println!(
                        "Unknown command: {}. Try: login <user> <password>, home, dashboard, profile, about, quit",
                        command
                    );
                    continue;
                }
            },
        }

        print_site(&site.render(&session), format)?;
    }

    Ok(())
}

fn print_site(view: &SiteView, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string(view)?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    writeln!(out, "\n# {}", view.header)?;

    match &view.body {
        SiteBody::Login(form) => {
            writeln!(out, "\n## {}", form.title)?;
            writeln!(out, "Fields: {}", form.fields.join(", "))?;
            writeln!(out, "Type: login <username> <password>")?;
        }
        SiteBody::Content {
            navigation,
            content,
        } => {
            let nav: Vec<String> = navigation
                .iter()
                .map(|item| {
                    if item.active {
                        format!("[{}]", item.label)
                    } else {
                        item.label.clone()
                    }
                })
                .collect();
            writeln!(out, "{}", nav.join(" | "))?;
            print_page(&mut out, content)?;
        }
    }

    if let Some(footer) = &view.footer {
        writeln!(out, "\n{}", footer)?;
    }

    Ok(())
}

fn print_page(out: &mut impl Write, content: &PageContent) -> io::Result<()> {
    match content {
        PageContent::Home {
            title,
            latest_updates,
            quick_links,
        } => {
            writeln!(out, "\n## {}", title)?;
            writeln!(out, "\n### Latest Updates")?;
            for item in latest_updates {
                writeln!(out, "- {}", item)?;
            }
            writeln!(out, "\n### Quick Links")?;
            for item in quick_links {
                writeln!(out, "- {}", item)?;
            }
        }
        PageContent::Dashboard {
            title,
            chart_title,
            monthly_sales,
            metrics,
        } => {
            writeln!(out, "\n## {}", title)?;
            writeln!(out, "\n### {}", chart_title)?;
            for month in monthly_sales {
                writeln!(out, "  {:<4} {:>4}", month.month, month.sales)?;
            }
            for tile in metrics {
                writeln!(out, "  {}: {} ({})", tile.label, tile.value, tile.delta)?;
            }
        }
        PageContent::Profile {
            title,
            name,
            role,
            avatar_url,
            email,
            phone,
        } => {
            writeln!(out, "\n## {}", title)?;
            writeln!(out, "\n### {}\n{}\n{}", name, role, avatar_url)?;
            writeln!(out, "\n### Contact Information\n{}\n{}", email, phone)?;
        }
        PageContent::About {
            title,
            mission,
            values,
        } => {
            writeln!(out, "\n## {}", title)?;
            for line in mission {
                writeln!(out, "{}", line)?;
            }
            writeln!(out, "\n### Our Values")?;
            for value in values {
                writeln!(out, "- {}", value)?;
            }
        }
    }
    Ok(())
}

fn print_submission(outcome: &SubmissionOutcome, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        SubmissionOutcome::Accepted(echo) => {
            println!("Registration successful!");
            for line in &echo.lines {
                println!("{}: {}", line.label, line.value);
            }
        }
        SubmissionOutcome::Rejected(errors) => {
            for error in errors {
                println!("Error: {}", error);
            }
        }
    }

    Ok(())
}
