//! Dashboard Page
//!
//! Every panel on one page. The three independent panels are fetched once
//! on mount; the trend chart is torn down on unmount.

use leptos::*;

use crate::components::{Alerts, BackendSettings, Heatmap, PredictForm, Summary, TrendPanel};
use crate::state::use_dashboard_state;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_dashboard_state();

    // Fetch initial data on mount
    let state_for_effect = state.clone();
    create_effect(move |_| state_for_effect.load_panels());

    on_cleanup(move || state.dispose());

    view! {
        <h1>"Health Risk Dashboard"</h1>
        <Alerts />
        <Heatmap />
        <TrendPanel />
        <Summary />
        <PredictForm />
        <BackendSettings />
    }
}
