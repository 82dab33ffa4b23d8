//! Heatmap Component
//!
//! One cell per city in backend order. Clicking a cell charts the city's
//! trend; hovering looks up its info for the console.

use leptos::*;

use riskboard::panel::heatmap::{HeatmapCell, HeatmapView};

use crate::state::use_dashboard_state;

/// Heatmap panel
#[component]
pub fn Heatmap() -> impl IntoView {
    let state = use_dashboard_state();
    let heatmap = state.heatmap;

    view! {
        <section>
            <h2>"City Risk Heatmap"</h2>
            {move || match heatmap.get() {
                HeatmapView::Empty => view! {}.into_view(),
                HeatmapView::Notice(text) => view! { <p class="notice">{text}</p> }.into_view(),
                HeatmapView::Cells(cells) => view! {
                    <div class="heatmap">
                        {cells.into_iter().map(|cell| view! { <Cell cell=cell /> }).collect_view()}
                    </div>
                }.into_view(),
            }}
        </section>
    }
}

#[component]
fn Cell(cell: HeatmapCell) -> impl IntoView {
    let state = use_dashboard_state();
    let class = cell_class(&cell);
    let label = cell.label.clone();

    let on_click = {
        let state = state.clone();
        let city = cell.city.clone();
        move |_| state.select_city(city.clone())
    };
    let on_hover = {
        let city = cell.city;
        move |_| state.hover_city(city.clone())
    };

    view! {
        <div class=class on:click=on_click on:mouseenter=on_hover>
            {label}
        </div>
    }
}

/// Class list of a cell: base class plus its tier
pub fn cell_class(cell: &HeatmapCell) -> String {
    format!("heatmap-cell {}", cell.tier.css_class())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskboard::CityRisk;

    #[test]
    fn test_cell_class_follows_tier() {
        let high = HeatmapCell::new(&CityRisk::new("Delhi", 0.8));
        let low = HeatmapCell::new(&CityRisk::new("Shimla", 0.1));
        assert_eq!(cell_class(&high), "heatmap-cell high");
        assert_eq!(cell_class(&low), "heatmap-cell low");
    }
}
