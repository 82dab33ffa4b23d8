//! High-risk alert banner

use leptos::*;

use riskboard::panel::alerts::AlertsView;

use crate::state::use_dashboard_state;

#[component]
pub fn Alerts() -> impl IntoView {
    let state = use_dashboard_state();
    let alerts = state.alerts;

    move || match alerts.get() {
        AlertsView::Empty => view! {}.into_view(),
        AlertsView::Banner(text) => view! { <div class="alert-banner">{text}</div> }.into_view(),
        AlertsView::Notice(text) => view! { <p class="notice">{text}</p> }.into_view(),
    }
}
