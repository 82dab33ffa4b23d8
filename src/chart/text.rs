//! Terminal chart surface
//!
//! Draws the trend as one bar per date. Only one frame exists at a time;
//! destroying its handle drops it.

use super::{ChartSurface, LineChartSpec};

const DEFAULT_WIDTH: usize = 40;

/// Handle of a chart drawn on a [`TextChart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChartId(u64);

#[derive(Debug)]
pub struct TextChart {
    width: usize,
    next_id: u64,
    current: Option<(TextChartId, String)>,
}

impl Default for TextChart {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl TextChart {
    /// Surface with bars of at most `width` cells
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            next_id: 0,
            current: None,
        }
    }

    /// Text of the live chart, if any
    pub fn frame(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, text)| text.as_str())
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    fn draw(&self, spec: &LineChartSpec) -> String {
        let (min, max) = spec.y_bounds();
        let label_width = spec
            .series
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(spec.x_axis.title.len());
        let glyph = if spec.fill { '█' } else { '•' };

        let mut out = String::new();
        out.push_str(&spec.dataset_label);
        out.push('\n');
        out.push_str(&format!(
            "{:<label_width$} | {} [{}, {}]\n",
            spec.x_axis.title,
            spec.y_axis.title,
            min,
            max,
            label_width = label_width
        ));

        if spec.series.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        for (label, value) in spec.series.labels.iter().zip(&spec.series.values) {
            let fraction = ((value.clamp(min, max) - min) / (max - min)).clamp(0.0, 1.0);
            let cells = (fraction * self.width as f64).round() as usize;
            out.push_str(&format!(
                "{:<label_width$} | {:<bar_width$} {}\n",
                label,
                glyph.to_string().repeat(cells),
                value,
                label_width = label_width,
                bar_width = self.width
            ));
        }

        out
    }
}

impl ChartSurface for TextChart {
    type Handle = TextChartId;

    fn create(&mut self, spec: &LineChartSpec) -> TextChartId {
        self.next_id += 1;
        let id = TextChartId(self.next_id);
        let text = self.draw(spec);
        self.current = Some((id, text));
        id
    }

    fn destroy(&mut self, handle: TextChartId) {
        if matches!(self.current, Some((id, _)) if id == handle) {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::TrendSeries;
    use crate::model::TrendPoint;

    fn spec() -> LineChartSpec {
        let points = vec![
            TrendPoint::new("2024-01-01", 0.0),
            TrendPoint::new("2024-01-02", 0.5),
            TrendPoint::new("2024-01-03", 1.0),
        ];
        LineChartSpec::risk_trend("Delhi", TrendSeries::from_points(&points))
    }

    #[test]
    fn test_draw_bars() {
        let mut surface = TextChart::new(10);
        surface.create(&spec());

        let frame = surface.frame().unwrap();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "Delhi Risk Trend");
        assert!(lines[1].contains("Risk Score [0, 1]"));
        assert!(lines[2].starts_with("2024-01-01 |  "));
        assert!(lines[3].contains(&"█".repeat(5)));
        assert!(lines[4].contains(&"█".repeat(10)));
        assert!(lines[4].ends_with(" 1"));
    }

    #[test]
    fn test_destroy_only_matching_handle() {
        let mut surface = TextChart::default();
        let first = surface.create(&spec());
        let second = surface.create(&spec());

        surface.destroy(first);
        assert!(surface.is_live());

        surface.destroy(second);
        assert!(!surface.is_live());
    }
}
