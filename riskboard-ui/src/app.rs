//! App Root Component
//!
//! Routing and the dashboard state provider.

use leptos::*;
use leptos_router::*;

use crate::pages::Dashboard;
use crate::state::global::provide_dashboard_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_dashboard_state();

    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Dashboard />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section>
            <h1>"Page Not Found"</h1>
            <p class="notice">"The page you're looking for doesn't exist."</p>
            <A href="/">"Back to Dashboard"</A>
        </section>
    }
}
