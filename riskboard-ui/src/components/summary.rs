//! Summary statistics panel

use leptos::*;

use riskboard::panel::summary::SummaryView;

use crate::state::use_dashboard_state;

#[component]
pub fn Summary() -> impl IntoView {
    let state = use_dashboard_state();
    let summary = state.summary;

    view! {
        <section>
            <h2>"Summary"</h2>
            {move || match summary.get() {
                SummaryView::Empty => view! {}.into_view(),
                SummaryView::Notice(text) => view! { <p class="notice">{text}</p> }.into_view(),
                SummaryView::Fields(fields) => fields
                    .into_iter()
                    .map(|field| view! {
                        <p><strong>{format!("{}:", field.label)}</strong>" "{field.value}</p>
                    })
                    .collect_view(),
            }}
        </section>
    }
}
