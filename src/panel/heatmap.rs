//! Heatmap panel
//!
//! One cell per city, labeled `"<city>: <risk>"` and classified by tier.
//! Every render replaces the previous cells wholesale. Cells carry two
//! triggers: activation selects the city's trend, hover looks up city
//! info for the diagnostic log only.

use serde::Serialize;
use std::sync::Mutex;

use super::{lock, PanelState};
use crate::client::RiskApi;
use crate::model::{CityRisk, RiskTier};

/// Text that replaces the whole panel when the heatmap cannot be loaded
pub const HEATMAP_FAILURE: &str = "Failed to load heatmap data.";

/// One rendered city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub city: String,
    pub risk: f64,
    pub tier: RiskTier,
    pub label: String,
}

impl HeatmapCell {
    pub fn new(record: &CityRisk) -> Self {
        Self {
            city: record.city.clone(),
            risk: record.risk,
            tier: record.tier(),
            label: cell_label(record),
        }
    }
}

/// What the heatmap region shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum HeatmapView {
    /// Nothing yet; the region stays empty while loading
    Empty,
    Cells(Vec<HeatmapCell>),
    /// Plain-text notice replacing all cells
    Notice(String),
}

/// `"<city>: <risk>"`, with the score exactly as received
pub fn cell_label(record: &CityRisk) -> String {
    format!("{}: {}", record.city, record.risk)
}

/// Rendering rule of the heatmap panel
pub fn render(state: &PanelState<Vec<CityRisk>>) -> HeatmapView {
    match state {
        PanelState::Idle | PanelState::Loading => HeatmapView::Empty,
        PanelState::Ready(records) => HeatmapView::Cells(records.iter().map(HeatmapCell::new).collect()),
        PanelState::Failed(_) => HeatmapView::Notice(HEATMAP_FAILURE.to_string()),
    }
}

/// Heatmap data and its lifecycle
#[derive(Debug, Default)]
pub struct HeatmapPanel {
    state: Mutex<PanelState<Vec<CityRisk>>>,
}

impl HeatmapPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and replace the heatmap
    pub async fn load<A: RiskApi + ?Sized>(&self, api: &A) -> HeatmapView {
        *lock(&self.state) = PanelState::Loading;

        let result = api.heatmap_data().await;
        match &result {
            Ok(records) => tracing::info!(cities = records.len(), "heatmap loaded"),
            Err(e) => tracing::error!(error = %e, kind = e.kind(), "failed to load heatmap"),
        }

        let state = PanelState::from_result(result);
        let view = render(&state);
        *lock(&self.state) = state;
        view
    }

    pub fn state(&self) -> PanelState<Vec<CityRisk>> {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> HeatmapView {
        render(&lock(&self.state))
    }
}

/// Hover side channel: fetch city info and log it
///
/// The payload is never rendered. Failures are logged and swallowed.
pub async fn lookup_city_info<A: RiskApi + ?Sized>(api: &A, city: &str) -> Option<serde_json::Value> {
    match api.city_info(city).await {
        Ok(info) => {
            tracing::info!(city = %city, info = %info, "city info");
            Some(info)
        }
        Err(e) => {
            tracing::warn!(city = %city, error = %e, "city info lookup failed");
            None
        }
    }
}
