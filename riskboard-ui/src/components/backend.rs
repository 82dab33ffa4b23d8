//! Backend origin setting
//!
//! Stores the override in local storage and reloads so every panel
//! refetches from the new origin.

use leptos::*;

use crate::api::{get_api_base, set_api_base};

#[component]
pub fn BackendSettings() -> impl IntoView {
    let (url, set_url) = create_signal(get_api_base());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_api_base(url.get_untracked().trim());

        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <footer>
            <form on:submit=on_submit>
                <label>"Backend"</label>
                <input
                    type="url"
                    prop:value=url
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="submit">"Save"</button>
            </form>
        </footer>
    }
}
