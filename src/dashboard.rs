//! Dashboard orchestration
//!
//! Wires the panels to one backend:
//! - [`Dashboard::load`] fetches heatmap, summary and alerts concurrently,
//!   once per page load
//! - [`Dashboard::select_city`] is the heatmap activation trigger
//! - [`Dashboard::hover_city`] is the heatmap hover trigger
//! - [`Dashboard::predict`] is the form submission handler

use futures_util::future::join3;
use serde::Serialize;

use crate::chart::ChartSurface;
use crate::client::RiskApi;
use crate::panel::alerts::{AlertsPanel, AlertsView};
use crate::panel::heatmap::{self, HeatmapPanel, HeatmapView};
use crate::panel::prediction::{PredictionForm, PredictionView};
use crate::panel::summary::{SummaryPanel, SummaryView};
use crate::panel::trend::{TrendChart, TrendOutcome, TrendView};

/// Rendered state of every panel at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub heatmap: HeatmapView,
    pub trend: TrendView,
    pub summary: SummaryView,
    pub alerts: AlertsView,
    pub prediction: PredictionView,
}

pub struct Dashboard<A: RiskApi, S: ChartSurface> {
    api: A,
    heatmap: HeatmapPanel,
    trend: TrendChart<S>,
    summary: SummaryPanel,
    alerts: AlertsPanel,
    prediction: PredictionForm,
}

impl<A: RiskApi, S: ChartSurface> Dashboard<A, S> {
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            heatmap: HeatmapPanel::new(),
            trend: TrendChart::new(surface),
            summary: SummaryPanel::new(),
            alerts: AlertsPanel::new(),
            prediction: PredictionForm::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Page-load fetch of the three independent panels
    pub async fn load(&self) -> DashboardSnapshot {
        tracing::info!("loading dashboard");

        join3(
            self.heatmap.load(&self.api),
            self.summary.load(&self.api),
            self.alerts.load(&self.api),
        )
        .await;

        self.snapshot()
    }

    /// Heatmap cell activated: show that city's trend
    pub async fn select_city(&self, city: &str) -> TrendOutcome {
        self.trend.show(&self.api, city).await
    }

    /// Heatmap cell hovered: diagnostic city lookup
    pub async fn hover_city(&self, city: &str) -> Option<serde_json::Value> {
        heatmap::lookup_city_info(&self.api, city).await
    }

    /// Prediction form submitted
    pub async fn predict(&self, city: &str, date: &str) -> PredictionView {
        match self.prediction.submit(&self.api, city, date).await {
            Some(view) => view,
            None => self.prediction.view(),
        }
    }

    pub fn heatmap(&self) -> &HeatmapPanel {
        &self.heatmap
    }

    pub fn trend(&self) -> &TrendChart<S> {
        &self.trend
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn alerts(&self) -> &AlertsPanel {
        &self.alerts
    }

    pub fn prediction(&self) -> &PredictionForm {
        &self.prediction
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            heatmap: self.heatmap.view(),
            trend: self.trend.view(),
            summary: self.summary.view(),
            alerts: self.alerts.view(),
            prediction: self.prediction.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::TextChart;
    use crate::client::fake::FakeApi;
    use crate::model::{AlertSet, CityRisk, SummaryStats, TrendPoint};
    use crate::panel::heatmap::HEATMAP_FAILURE;

    fn backend() -> FakeApi {
        let mut api = FakeApi {
            heatmap: Some(vec![CityRisk::new("Delhi", 0.91), CityRisk::new("Chennai", 0.42)]),
            summary: Some(SummaryStats {
                highest_risk_city: CityRisk::new("Delhi", 0.91),
                average_risk: 0.67,
                total_cities: 2,
            }),
            alerts: Some(AlertSet {
                count: 1,
                alerts: vec![CityRisk::new("Delhi", 0.91)],
            }),
            ..Default::default()
        };
        api.trends
            .insert("Delhi".to_string(), vec![TrendPoint::new("2024-01-01", 0.9)]);
        api
    }

    #[tokio::test]
    async fn test_load_fetches_three_panels() {
        let dashboard = Dashboard::new(backend(), TextChart::default());
        let snapshot = dashboard.load().await;

        let mut calls = dashboard.api().calls();
        calls.sort();
        assert_eq!(calls, vec!["alerts", "heatmap", "summary"]);

        assert!(matches!(snapshot.heatmap, HeatmapView::Cells(ref c) if c.len() == 2));
        assert!(matches!(snapshot.summary, SummaryView::Fields(_)));
        assert_eq!(snapshot.alerts, AlertsView::Banner("High Risk Alert: Delhi(0.91)".to_string()));
        assert_eq!(snapshot.trend, TrendView::Empty);
        assert_eq!(snapshot.prediction, PredictionView::Empty);
    }

    #[tokio::test]
    async fn test_panels_fail_independently() {
        let api = FakeApi {
            alerts: Some(AlertSet::empty()),
            ..Default::default()
        };
        let dashboard = Dashboard::new(api, TextChart::default());
        let snapshot = dashboard.load().await;

        assert_eq!(snapshot.heatmap, HeatmapView::Notice(HEATMAP_FAILURE.to_string()));
        assert!(matches!(snapshot.summary, SummaryView::Notice(_)));
        assert_eq!(snapshot.alerts, AlertsView::Empty);
    }

    #[tokio::test]
    async fn test_select_and_hover() {
        let mut api = backend();
        api.city_info
            .insert("Delhi".to_string(), serde_json::json!({"state": "Delhi"}));
        let dashboard = Dashboard::new(api, TextChart::default());

        let outcome = dashboard.select_city("Delhi").await;
        assert!(matches!(outcome, TrendOutcome::Rendered { points: 1, .. }));
        dashboard
            .trend()
            .with_surface(|s| assert!(s.frame().unwrap().starts_with("Delhi Risk Trend")));

        assert!(dashboard.hover_city("Delhi").await.is_some());
        // Hover never touches the visible panels
        assert_eq!(dashboard.snapshot().heatmap, HeatmapView::Empty);
    }
}
