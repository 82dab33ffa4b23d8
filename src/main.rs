//! Riskboard CLI
//!
//! Command-line front end for the risk dashboard:
//! - Print the dashboard panels
//! - Draw a city's risk trend
//! - Request a prediction
//! - List and register cities
//! - Serve the browser dashboard bundle

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskboard::config::{self, Config, LoggingConfig};
use riskboard::panel::alerts::AlertsView;
use riskboard::panel::heatmap::HeatmapView;
use riskboard::panel::prediction::PredictionView;
use riskboard::panel::summary::SummaryView;
use riskboard::panel::trend::TrendOutcome;
use riskboard::{CityRecord, Dashboard, DashboardSnapshot, HttpRiskClient, NewCity, RiskApi, TextChart};

#[derive(Parser)]
#[command(name = "riskboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "City health-risk dashboard")]
#[command(long_about = "Riskboard shows city health-risk data from a risk backend.\nPrint the dashboard, chart a city's trend, or serve the browser dashboard.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Risk backend URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load heatmap, summary and alerts
    Dashboard,

    /// Draw a city's risk trend
    Trend {
        /// City name
        city: String,
        /// Bar width in characters
        #[arg(short, long, default_value = "40")]
        width: usize,
    },

    /// Show the backend's info payload for a city
    Info {
        /// City name
        city: String,
    },

    /// Predict the risk for a city on a date
    Predict {
        /// City name
        #[arg(long)]
        city: String,
        /// Date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List city records
    Cities {
        #[arg(long, default_value = "0")]
        skip: u32,
        #[arg(long, default_value = "100")]
        limit: u32,
    },

    /// Register a city with the backend
    AddCity {
        #[arg(long)]
        name: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        population: i64,
        /// Base risk score, 0.0 to 1.0
        #[arg(long)]
        base_risk: f64,
        #[arg(long, default_value = "1000.0")]
        area_sq_km: f64,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Serve the browser dashboard bundle
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Directory holding the built bundle
        #[arg(long)]
        dist_dir: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    match cli.command {
        Commands::Dashboard => {
            let dashboard = Dashboard::new(client(&config)?, TextChart::default());
            let snapshot = dashboard.load().await;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Table => print_dashboard(&snapshot),
            }
        }

        Commands::Trend { city, width } => {
            let dashboard = Dashboard::new(client(&config)?, TextChart::new(width));

            match dashboard.select_city(&city).await {
                TrendOutcome::Rendered { .. } => {
                    let frame = dashboard
                        .trend()
                        .with_surface(|s| s.frame().map(str::to_string))
                        .unwrap_or_default();
                    print!("{}", frame);
                }
                TrendOutcome::Failed(e) => bail!("Failed to load trend for {}: {}", city, e),
                TrendOutcome::Superseded => {}
            }
        }

        Commands::Info { city } => {
            let info = client(&config)?
                .city_info(&city)
                .await
                .with_context(|| format!("city info for {}", city))?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Predict { city, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let dashboard = Dashboard::new(client(&config)?, TextChart::default());

            match dashboard.predict(&city, &date).await {
                PredictionView::Result(text) => match cli.format {
                    OutputFormat::Json => {
                        if let Some(result) = dashboard.prediction().state().ready() {
                            println!("{}", serde_json::to_string_pretty(result)?);
                        }
                    }
                    OutputFormat::Table => println!("{}", text),
                },
                PredictionView::Notice(text) => bail!(text),
                PredictionView::Empty => {}
            }
        }

        Commands::Cities { skip, limit } => {
            let cities = client(&config)?
                .cities(skip, limit)
                .await
                .context("failed to list cities")?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cities)?),
                OutputFormat::Table => print_cities(&cities),
            }
        }

        Commands::AddCity {
            name,
            state,
            population,
            base_risk,
            area_sq_km,
            latitude,
            longitude,
        } => {
            let city = NewCity {
                name,
                state,
                population,
                base_risk,
                area_sq_km,
                latitude,
                longitude,
            };
            let record = client(&config)?
                .create_city(&city)
                .await
                .with_context(|| format!("failed to register {}", city.name))?;
            tracing::info!(id = record.id, name = %record.name, "city registered");

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputFormat::Table => print_cities(std::slice::from_ref(&record)),
            }
        }

        Commands::Serve {
            host,
            port,
            dist_dir,
        } => {
            if let Some(host) = host {
                config.serve.host = host;
            }
            if let Some(port) = port {
                config.serve.port = port;
            }
            if let Some(dir) = dist_dir {
                config.serve.dist_dir = dir;
            }

            tracing::info!("Riskboard v{}", env!("CARGO_PKG_VERSION"));
            riskboard::server::serve(&config.serve).await?;
        }

        Commands::Config { output } => {
            let content = config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("riskboard={},tower_http=info", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output, so logs go to stderr
    if logging.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn client(config: &Config) -> anyhow::Result<HttpRiskClient> {
    HttpRiskClient::new(&config.api).context("failed to build HTTP client")
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!("Heatmap");
    println!("{}", "-".repeat(40));
    match &snapshot.heatmap {
        HeatmapView::Cells(cells) if cells.is_empty() => println!("No cities"),
        HeatmapView::Cells(cells) => {
            for cell in cells {
                println!("{:<28} {:>6}", cell.label, cell.tier);
            }
        }
        HeatmapView::Notice(text) => println!("{}", text),
        HeatmapView::Empty => {}
    }

    println!();
    println!("Summary");
    println!("{}", "-".repeat(40));
    match &snapshot.summary {
        SummaryView::Fields(fields) => {
            for field in fields {
                println!("{:<20} {}", format!("{}:", field.label), field.value);
            }
        }
        SummaryView::Notice(text) => println!("{}", text),
        SummaryView::Empty => {}
    }

    println!();
    match &snapshot.alerts {
        AlertsView::Banner(text) | AlertsView::Notice(text) => println!("{}", text),
        AlertsView::Empty => println!("No high-risk alerts"),
    }
}

fn print_cities(cities: &[CityRecord]) {
    if cities.is_empty() {
        println!("No cities.");
        return;
    }

    println!(
        "{:<6} {:<20} {:<18} {:>12} {:>9} {:>10}",
        "ID", "Name", "State", "Population", "Base Risk", "Density"
    );
    println!("{}", "-".repeat(80));

    for city in cities {
        println!(
            "{:<6} {:<20} {:<18} {:>12} {:>9} {:>10.1}",
            city.id,
            city.name,
            city.state,
            city.population,
            city.base_risk,
            city.density()
        );
    }
}
