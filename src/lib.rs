//! # Riskboard
//!
//! Client side of a city health-risk dashboard: a typed client for the risk
//! backend, the panels that render its data, and the trend chart.
//!
//! ## Modules
//!
//! - [`model`]: wire records exchanged with the backend
//! - [`client`]: the [`RiskApi`] seam and its HTTP implementation
//! - [`panel`]: heatmap, trend, summary, alerts and prediction panels
//! - [`chart`]: chart description and drawing surfaces
//! - [`dashboard`]: wires all panels to one backend
//! - [`config`]: TOML + environment configuration (native only)
//! - [`server`]: static server for the browser bundle (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use riskboard::{config::ApiConfig, Dashboard, HttpRiskClient, TextChart};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpRiskClient::new(&ApiConfig::default())?;
//!     let dashboard = Dashboard::new(client, TextChart::default());
//!
//!     let snapshot = dashboard.load().await;
//!     println!("{}", serde_json::to_string_pretty(&snapshot)?);
//!
//!     dashboard.select_city("Delhi").await;
//!     if let Some(frame) = dashboard.trend().with_surface(|s| s.frame().map(str::to_string)) {
//!         println!("{}", frame);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod panel;
pub mod sequence;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod server;

pub use chart::{ChartSurface, LineChartSpec, TextChart, TrendSeries};
pub use client::{Endpoint, RiskApi};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::{RequestError, RequestResult};
pub use model::{AlertSet, CityRecord, CityRisk, NewCity, PredictionRequest, PredictionResult, RiskTier, SummaryStats, TrendPoint};
pub use panel::PanelState;

#[cfg(feature = "native")]
pub use client::HttpRiskClient;
