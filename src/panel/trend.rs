//! Trend chart controller
//!
//! Owns the one chart instance of the trend panel. Invariants:
//! - at most one live chart: the previous instance is destroyed before a
//!   new one is created
//! - latest request wins: a response is applied only if no newer request
//!   was issued while it was in flight
//! - a failed request leaves the current chart in place

use serde::Serialize;
use std::sync::Mutex;

use super::{lock, PanelState};
use crate::chart::{ChartSurface, LineChartSpec, TrendSeries};
use crate::client::RiskApi;
use crate::error::RequestError;
use crate::sequence::Sequencer;

/// How a trend request ended
#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome {
    /// The chart now shows this city
    Rendered { city: String, points: usize },
    /// A newer request superseded this one; nothing was applied
    Superseded,
    /// The request failed; the previous chart is untouched
    Failed(RequestError),
}

/// Caption under the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TrendView {
    Empty,
    Showing(String),
    Notice(String),
}

/// Rendering rule for the trend caption. `requested` is the city of the
/// most recent request; a ready state carries the city it drew.
pub fn render(state: &PanelState<String>, requested: Option<&str>) -> TrendView {
    match state {
        PanelState::Idle => TrendView::Empty,
        PanelState::Loading => match requested {
            Some(city) => TrendView::Showing(format!("Loading trend for {}...", city)),
            None => TrendView::Empty,
        },
        PanelState::Ready(city) => TrendView::Showing(format!("Risk trend for {}", city)),
        PanelState::Failed(_) => TrendView::Notice(match requested {
            Some(city) => format!("Failed to load trend for {}.", city),
            None => "Failed to load trend.".to_string(),
        }),
    }
}

struct ChartSlot<S: ChartSurface> {
    surface: S,
    live: Option<S::Handle>,
}

/// The trend panel: chart surface, live handle, and request sequence
pub struct TrendChart<S: ChartSurface> {
    slot: Mutex<ChartSlot<S>>,
    sequencer: Sequencer,
    state: Mutex<PanelState<String>>,
    requested: Mutex<Option<String>>,
}

impl<S: ChartSurface> TrendChart<S> {
    pub fn new(surface: S) -> Self {
        Self {
            slot: Mutex::new(ChartSlot {
                surface,
                live: None,
            }),
            sequencer: Sequencer::new(),
            state: Mutex::new(PanelState::Idle),
            requested: Mutex::new(None),
        }
    }

    /// Fetch a city's series and draw it. The current chart stays up while
    /// the request is in flight.
    pub async fn show<A: RiskApi + ?Sized>(&self, api: &A, city: &str) -> TrendOutcome {
        let ticket = self.sequencer.issue();
        *lock(&self.requested) = Some(city.to_string());
        *lock(&self.state) = PanelState::Loading;
        tracing::debug!(city = %city, ticket = ticket.id(), "requesting trend");

        let result = api.trend(city).await;

        if !ticket.is_current() {
            tracing::debug!(city = %city, ticket = ticket.id(), "discarding superseded trend response");
            return TrendOutcome::Superseded;
        }

        match result {
            Ok(points) => {
                let series = TrendSeries::from_points(&points);
                let count = series.len();
                self.render(city, series);
                tracing::info!(city = %city, points = count, "trend rendered");
                TrendOutcome::Rendered {
                    city: city.to_string(),
                    points: count,
                }
            }
            Err(e) => {
                tracing::error!(city = %city, error = %e, kind = e.kind(), "failed to load trend");
                *lock(&self.state) = PanelState::Failed(e.to_string());
                TrendOutcome::Failed(e)
            }
        }
    }

    /// Replace the live chart with one drawing `series`
    pub fn render(&self, city: &str, series: TrendSeries) {
        let spec = LineChartSpec::risk_trend(city, series);

        let mut slot = lock(&self.slot);
        if let Some(previous) = slot.live.take() {
            slot.surface.destroy(previous);
        }
        let handle = slot.surface.create(&spec);
        slot.live = Some(handle);
        drop(slot);

        *lock(&self.state) = PanelState::Ready(city.to_string());
    }

    /// Destroy the live chart and drop any in-flight response
    pub fn dispose(&self) {
        self.sequencer.cancel_all();

        let mut slot = lock(&self.slot);
        if let Some(previous) = slot.live.take() {
            slot.surface.destroy(previous);
        }
        drop(slot);

        *lock(&self.requested) = None;
        *lock(&self.state) = PanelState::Idle;
    }

    pub fn has_chart(&self) -> bool {
        lock(&self.slot).live.is_some()
    }

    pub fn state(&self) -> PanelState<String> {
        lock(&self.state).clone()
    }

    pub fn view(&self) -> TrendView {
        let requested = lock(&self.requested).clone();
        render(&lock(&self.state), requested.as_deref())
    }

    /// Read access to the surface, e.g. to print a text frame
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.slot).surface)
    }
}
