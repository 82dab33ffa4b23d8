//! Prediction Form Component
//!
//! City and date go to the backend as typed. A new submission clears the
//! previous result straight away.

use leptos::*;

use riskboard::panel::prediction::PredictionView;

use crate::state::use_dashboard_state;

#[component]
pub fn PredictForm() -> impl IntoView {
    let state = use_dashboard_state();
    let result = state.prediction;

    let (city, set_city) = create_signal(String::new());
    let (date, set_date) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.predict(city.get_untracked(), date.get_untracked());
    };

    view! {
        <section>
            <h2>"Predict Risk"</h2>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="City"
                    prop:value=city
                    on:input=move |ev| set_city.set(event_target_value(&ev))
                />
                <input
                    type="date"
                    prop:value=date
                    on:input=move |ev| set_date.set(event_target_value(&ev))
                />
                <button type="submit">"Predict"</button>
            </form>
            {move || match result.get() {
                PredictionView::Empty => view! {}.into_view(),
                PredictionView::Result(text) => view! { <p>{text}</p> }.into_view(),
                PredictionView::Notice(text) => view! { <p class="notice">{text}</p> }.into_view(),
            }}
        </section>
    }
}
