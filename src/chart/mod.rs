//! Trend chart model
//!
//! A chart is described once as a [`LineChartSpec`] and drawn by a
//! [`ChartSurface`]. Surfaces hand out a handle per constructed chart and
//! must release everything the chart holds when the handle is destroyed.
//!
//! Surfaces:
//! - [`TextChart`]: rows of bars for the terminal
//! - the browser dashboard draws onto a canvas

mod text;

pub use text::TextChart;

use serde::Serialize;

use crate::model::TrendPoint;

/// Something charts can be drawn on
pub trait ChartSurface {
    /// Identifies one constructed chart instance
    type Handle;

    /// Construct and draw a chart
    fn create(&mut self, spec: &LineChartSpec) -> Self::Handle;

    /// Tear down a chart created by this surface
    fn destroy(&mut self, handle: Self::Handle);
}

/// Parallel label/value sequences in backend order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn from_points(points: &[TrendPoint]) -> Self {
        let (labels, values) = points
            .iter()
            .map(|p| (p.date.clone(), p.risk_score))
            .unzip();
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Axis title and optional fixed bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Everything a surface needs to draw the trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub dataset_label: String,
    pub series: TrendSeries,
    /// Fill the area under the line
    pub fill: bool,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl LineChartSpec {
    /// Filled risk line for a city, y fixed to [0, 1]
    pub fn risk_trend(city: &str, series: TrendSeries) -> Self {
        Self {
            dataset_label: format!("{} Risk Trend", city),
            series,
            fill: true,
            x_axis: Axis {
                title: "Date".to_string(),
                min: None,
                max: None,
            },
            y_axis: Axis {
                title: "Risk Score".to_string(),
                min: Some(0.0),
                max: Some(1.0),
            },
        }
    }

    /// y bounds, falling back to the data range when not fixed
    pub fn y_bounds(&self) -> (f64, f64) {
        let data_min = self.series.values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = self.series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let min = self.y_axis.min.unwrap_or(if data_min.is_finite() { data_min } else { 0.0 });
        let max = self.y_axis.max.unwrap_or(if data_max.is_finite() { data_max } else { 1.0 });

        if max > min {
            (min, max)
        } else {
            (min - 1.0, max + 1.0)
        }
    }
}

/// Plot area inside a drawing of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub const MARGIN_LEFT: f64 = 60.0;
    pub const MARGIN_RIGHT: f64 = 20.0;
    pub const MARGIN_TOP: f64 = 30.0;
    pub const MARGIN_BOTTOM: f64 = 50.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: Self::MARGIN_LEFT,
            top: Self::MARGIN_TOP,
            width: (width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT).max(0.0),
            height: (height - Self::MARGIN_TOP - Self::MARGIN_BOTTOM).max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// x of the i-th of n evenly spaced labels
    pub fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width / 2.0;
        }
        self.left + (index as f64 / (count - 1) as f64) * self.width
    }

    /// y of a value; canvas y grows downward
    pub fn y(&self, value: f64, (min, max): (f64, f64)) -> f64 {
        let clamped = value.clamp(min, max);
        self.top + ((max - clamped) / (max - min)) * self.height
    }
}
