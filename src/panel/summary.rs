//! Summary panel
//!
//! Three fixed fields: highest-risk city, average risk, total cities.
//! Values are shown exactly as the backend sent them.

use serde::Serialize;
use std::sync::Mutex;

use super::{lock, PanelState};
use crate::client::RiskApi;
use crate::model::SummaryStats;

pub const SUMMARY_FAILURE: &str = "Failed to load summary.";

/// A labeled value in the summary block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SummaryView {
    Empty,
    Fields(Vec<SummaryField>),
    Notice(String),
}

/// The three summary fields, in display order
pub fn fields(stats: &SummaryStats) -> Vec<SummaryField> {
    vec![
        SummaryField {
            label: "Highest Risk City",
            value: format!(
                "{} ({})",
                stats.highest_risk_city.city, stats.highest_risk_city.risk
            ),
        },
        SummaryField {
            label: "Average Risk",
            value: stats.average_risk.to_string(),
        },
        SummaryField {
            label: "Total Cities",
            value: stats.total_cities.to_string(),
        },
    ]
}

pub fn render(state: &PanelState<SummaryStats>) -> SummaryView {
    match state {
        PanelState::Idle | PanelState::Loading => SummaryView::Empty,
        PanelState::Ready(stats) => SummaryView::Fields(fields(stats)),
        PanelState::Failed(_) => SummaryView::Notice(SUMMARY_FAILURE.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct SummaryPanel {
    state: Mutex<PanelState<SummaryStats>>,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: RiskApi + ?Sized>(&self, api: &A) -> SummaryView {
        *lock(&self.state) = PanelState::Loading;

        let result = api.summary().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, kind = e.kind(), "failed to load summary");
        }

        let state = PanelState::from_result(result);
        let view = render(&state);
        *lock(&self.state) = state;
        view
    }

    pub fn state(&self) -> PanelState<SummaryStats> {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> SummaryView {
        render(&lock(&self.state))
    }
}
