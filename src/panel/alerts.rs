//! Alerts panel
//!
//! A single banner listing every alert as `city(risk)`, comma-joined in
//! input order. A zero count clears the region.

use serde::Serialize;
use std::sync::Mutex;

use super::{lock, PanelState};
use crate::client::RiskApi;
use crate::model::AlertSet;

pub const ALERTS_FAILURE: &str = "Failed to load alerts.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum AlertsView {
    Empty,
    Banner(String),
    Notice(String),
}

/// `"X(0.81), Y(0.95)"`
pub fn alert_list(set: &AlertSet) -> String {
    set.alerts
        .iter()
        .map(|a| format!("{}({})", a.city, a.risk))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render(state: &PanelState<AlertSet>) -> AlertsView {
    match state {
        PanelState::Idle | PanelState::Loading => AlertsView::Empty,
        PanelState::Ready(set) if set.count > 0 => {
            AlertsView::Banner(format!("High Risk Alert: {}", alert_list(set)))
        }
        PanelState::Ready(_) => AlertsView::Empty,
        PanelState::Failed(_) => AlertsView::Notice(ALERTS_FAILURE.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct AlertsPanel {
    state: Mutex<PanelState<AlertSet>>,
}

impl AlertsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: RiskApi + ?Sized>(&self, api: &A) -> AlertsView {
        *lock(&self.state) = PanelState::Loading;

        let result = api.alerts().await;
        match &result {
            Ok(set) if set.count > 0 => tracing::warn!(count = set.count, "high risk alerts"),
            Ok(_) => tracing::debug!("no alerts"),
            Err(e) => tracing::error!(error = %e, kind = e.kind(), "failed to load alerts"),
        }

        let state = PanelState::from_result(result);
        let view = render(&state);
        *lock(&self.state) = state;
        view
    }

    pub fn state(&self) -> PanelState<AlertSet> {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> AlertsView {
        render(&lock(&self.state))
    }
}
