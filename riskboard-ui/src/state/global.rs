//! Dashboard State
//!
//! One [`Dashboard`] controller shared through context, plus a signal per
//! panel holding its current view. Every async action runs the controller,
//! then copies the affected panel's view into its signal.

use leptos::*;
use std::rc::Rc;

use riskboard::panel::alerts::AlertsView;
use riskboard::panel::heatmap::HeatmapView;
use riskboard::panel::prediction::PredictionView;
use riskboard::panel::summary::SummaryView;
use riskboard::panel::trend::{TrendOutcome, TrendView};
use riskboard::Dashboard;

use crate::api::BrowserClient;
use crate::components::chart::CanvasSurface;

pub type RiskDashboard = Dashboard<BrowserClient, CanvasSurface>;

/// Dashboard state provided to all components
#[derive(Clone)]
pub struct DashboardState {
    pub dashboard: Rc<RiskDashboard>,
    pub canvas: NodeRef<html::Canvas>,
    pub heatmap: RwSignal<HeatmapView>,
    pub trend: RwSignal<TrendView>,
    pub summary: RwSignal<SummaryView>,
    pub alerts: RwSignal<AlertsView>,
    pub prediction: RwSignal<PredictionView>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let canvas = create_node_ref::<html::Canvas>();
    let dashboard = Dashboard::new(BrowserClient::from_storage(), CanvasSurface::new(canvas));

    let state = DashboardState {
        dashboard: Rc::new(dashboard),
        canvas,
        heatmap: create_rw_signal(HeatmapView::Empty),
        trend: create_rw_signal(TrendView::Empty),
        summary: create_rw_signal(SummaryView::Empty),
        alerts: create_rw_signal(AlertsView::Empty),
        prediction: create_rw_signal(PredictionView::Empty),
    };

    provide_context(state);
}

pub fn use_dashboard_state() -> DashboardState {
    use_context::<DashboardState>().expect("DashboardState not provided")
}

impl DashboardState {
    /// Page-load fetches; each panel renders as soon as its own data arrives
    pub fn load_panels(&self) {
        let state = self.clone();
        spawn_local(async move {
            let view = state.dashboard.heatmap().load(state.dashboard.api()).await;
            state.heatmap.set(view);
        });

        let state = self.clone();
        spawn_local(async move {
            let view = state.dashboard.summary().load(state.dashboard.api()).await;
            state.summary.set(view);
        });

        let state = self.clone();
        spawn_local(async move {
            let view = state.dashboard.alerts().load(state.dashboard.api()).await;
            state.alerts.set(view);
        });
    }

    /// Heatmap cell activated
    pub fn select_city(&self, city: String) {
        let state = self.clone();
        spawn_local(async move {
            match state.dashboard.select_city(&city).await {
                TrendOutcome::Superseded => return,
                TrendOutcome::Failed(e) => {
                    web_sys::console::error_1(&format!("Failed to load trend for {}: {}", city, e).into());
                }
                TrendOutcome::Rendered { .. } => {}
            }
            state.trend.set(state.dashboard.trend().view());
        });
    }

    /// Heatmap cell hovered: the payload goes to the console only
    pub fn hover_city(&self, city: String) {
        let state = self.clone();
        spawn_local(async move {
            match state.dashboard.hover_city(&city).await {
                Some(info) => web_sys::console::log_2(&format!("City info for {}:", city).into(), &info.to_string().into()),
                None => web_sys::console::warn_1(&format!("City info lookup failed for {}", city).into()),
            }
        });
    }

    /// Prediction form submitted
    pub fn predict(&self, city: String, date: String) {
        // The previous result disappears as soon as a new request starts
        self.prediction.set(PredictionView::Empty);

        let state = self.clone();
        spawn_local(async move {
            let view = state.dashboard.predict(&city, &date).await;
            if let PredictionView::Notice(_) = view {
                web_sys::console::error_1(&format!("Prediction failed for {} on {}", city, date).into());
            }
            state.prediction.set(view);
        });
    }

    /// Tear down the chart when the dashboard unmounts
    pub fn dispose(&self) {
        self.dashboard.trend().dispose();
        self.trend.set(TrendView::Empty);
    }
}
