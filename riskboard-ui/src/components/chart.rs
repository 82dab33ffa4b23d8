//! Chart Component
//!
//! Risk trend chart drawn on an HTML5 canvas. The canvas is the chart
//! surface: creating a chart paints it, destroying the live chart clears it.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use riskboard::chart::{ChartSurface, LineChartSpec, PlotArea};
use riskboard::panel::trend::TrendView;

use crate::state::use_dashboard_state;

const LINE_COLOR: &str = "#FF9800";
const FILL_COLOR: &str = "rgba(255, 152, 0, 0.2)";
const BACKGROUND: &str = "#1f2937";
const GRID_COLOR: &str = "#374151";
const TEXT_COLOR: &str = "#9ca3af";

/// Most x labels drawn before labels are skipped
const MAX_X_LABELS: usize = 8;

/// Handle of a chart painted on a [`CanvasSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasChartId(u64);

/// Chart surface backed by the trend panel's canvas
pub struct CanvasSurface {
    canvas: NodeRef<html::Canvas>,
    next_id: u64,
    current: Option<CanvasChartId>,
}

impl CanvasSurface {
    pub fn new(canvas: NodeRef<html::Canvas>) -> Self {
        Self {
            canvas,
            next_id: 0,
            current: None,
        }
    }

    /// Only a painted chart becomes current; an unmounted canvas holds none
    fn settle(&mut self, id: CanvasChartId, painted: bool) {
        self.current = painted.then_some(id);
    }
}

impl ChartSurface for CanvasSurface {
    type Handle = CanvasChartId;

    fn create(&mut self, spec: &LineChartSpec) -> CanvasChartId {
        self.next_id += 1;
        let id = CanvasChartId(self.next_id);

        let painted = match self.canvas.get_untracked() {
            Some(canvas) => {
                draw_chart(&canvas, spec);
                true
            }
            None => {
                web_sys::console::warn_1(&"Trend canvas is not mounted".into());
                false
            }
        };

        self.settle(id, painted);
        id
    }

    fn destroy(&mut self, handle: CanvasChartId) {
        if self.current != Some(handle) {
            return;
        }
        self.current = None;

        if let Some(canvas) = self.canvas.get_untracked() {
            if let Some(ctx) = context(&canvas) {
                ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
            }
        }
    }
}

/// Trend chart panel with its caption
#[component]
pub fn TrendPanel() -> impl IntoView {
    let state = use_dashboard_state();
    let caption = state.trend;

    view! {
        <section>
            <h2>"Risk Trend"</h2>
            <canvas node_ref=state.canvas width="800" height="400" />
            {move || match caption.get() {
                TrendView::Empty => view! {
                    <p class="notice">"Select a city on the heatmap to see its trend."</p>
                }.into_view(),
                TrendView::Showing(text) => view! { <p>{text}</p> }.into_view(),
                TrendView::Notice(text) => view! { <p class="notice">{text}</p> }.into_view(),
            }}
        </section>
    }
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Draw every `stride`-th x label so they do not overlap
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if count <= max_labels || max_labels == 0 {
        1
    } else {
        (count + max_labels - 1) / max_labels
    }
}

fn draw_chart(canvas: &HtmlCanvasElement, spec: &LineChartSpec) {
    let ctx = match context(canvas) {
        Some(ctx) => ctx,
        None => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = PlotArea::new(width, height);
    let bounds = spec.y_bounds();
    let (min, max) = bounds;

    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Horizontal grid and y labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let value = max - (i as f64 / 5.0) * (max - min);
        let y = area.y(value, bounds);

        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.left + area.width, y);
        ctx.stroke();

        ctx.set_fill_style(&TEXT_COLOR.into());
        let _ = ctx.fill_text(&format!("{:.1}", value), area.left - 30.0, y + 4.0);
    }

    // Dataset label
    ctx.set_fill_style(&LINE_COLOR.into());
    ctx.set_font("14px sans-serif");
    let _ = ctx.fill_text(&spec.dataset_label, area.left, 20.0);

    let values = &spec.series.values;
    let count = values.len();

    if count == 0 {
        ctx.set_fill_style(&TEXT_COLOR.into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
    } else {
        if spec.fill {
            ctx.begin_path();
            ctx.move_to(area.x(0, count), area.bottom());
            for (i, value) in values.iter().enumerate() {
                ctx.line_to(area.x(i, count), area.y(*value, bounds));
            }
            ctx.line_to(area.x(count - 1, count), area.bottom());
            ctx.close_path();
            ctx.set_fill_style(&FILL_COLOR.into());
            ctx.fill();
        }

        ctx.set_stroke_style(&LINE_COLOR.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, value) in values.iter().enumerate() {
            let (x, y) = (area.x(i, count), area.y(*value, bounds));
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style(&LINE_COLOR.into());
        for (i, value) in values.iter().enumerate() {
            ctx.begin_path();
            let _ = ctx.arc(area.x(i, count), area.y(*value, bounds), 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }

        // x labels
        ctx.set_fill_style(&TEXT_COLOR.into());
        ctx.set_font("12px sans-serif");
        ctx.set_text_align("center");
        let stride = label_stride(count, MAX_X_LABELS);
        for (i, label) in spec.series.labels.iter().enumerate().step_by(stride) {
            let _ = ctx.fill_text(label, area.x(i, count), area.bottom() + 18.0);
        }
        ctx.set_text_align("start");
    }

    // Axis titles
    ctx.set_fill_style(&TEXT_COLOR.into());
    ctx.set_font("13px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&spec.x_axis.title, area.left + area.width / 2.0, height - 8.0);

    ctx.save();
    if ctx.translate(14.0, area.top + area.height / 2.0).is_ok()
        && ctx.rotate(-std::f64::consts::FRAC_PI_2).is_ok()
    {
        let _ = ctx.fill_text(&spec.y_axis.title, 0.0, 0.0);
    }
    ctx.restore();
    ctx.set_text_align("start");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(5, 8), 1);
        assert_eq!(label_stride(8, 8), 1);
        assert_eq!(label_stride(9, 8), 2);
        assert_eq!(label_stride(30, 8), 4);
    }

    #[test]
    fn test_unpainted_chart_is_not_current() {
        let runtime = create_runtime();
        let mut surface = CanvasSurface::new(create_node_ref::<html::Canvas>());

        surface.settle(CanvasChartId(1), true);
        assert_eq!(surface.current, Some(CanvasChartId(1)));

        surface.settle(CanvasChartId(2), false);
        assert_eq!(surface.current, None);

        // Nothing to clear for a chart that was never painted
        surface.destroy(CanvasChartId(2));
        assert_eq!(surface.current, None);

        runtime.dispose();
    }
}
