//! UI Components
//!
//! One component per dashboard panel.

pub mod alerts;
pub mod backend;
pub mod chart;
pub mod heatmap;
pub mod prediction;
pub mod summary;

pub use alerts::Alerts;
pub use backend::BackendSettings;
pub use chart::TrendPanel;
pub use heatmap::Heatmap;
pub use prediction::PredictForm;
pub use summary::Summary;
