//! Renderer-agnostic chart geometry.
//!
//! Maps values into chart-space, a rectangle of the configured width and
//! height centered on the origin. Every layout produced here is plain data
//! that any renderer can turn into its own drawable primitives.

pub mod bar;
pub mod legend;
pub mod line;
pub mod palette;
pub mod rank;

pub use bar::{layout_bars, BarLayout};
pub use legend::{build_legend_rows, LegendLayout};
pub use line::{layout_line, LineLayout};
pub use palette::{BrandStyles, Color};
pub use rank::{assign_rank, sort_moves, RankedBrand, SortMove};

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Horizontal gap between the plot area and the y axis.
pub const AXIS_OFFSET: f64 = 0.5;

/// Length of a y-axis tick mark.
pub const Y_TICK_LENGTH: f64 = 0.2;

/// Length of an x-axis tick mark.
pub const X_TICK_LENGTH: f64 = 0.2;

/// Upper bound on the number of y-axis ticks a range may produce.
pub const MAX_TICKS: usize = 10_000;

/// A position in chart-space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight line between two points (axis line or tick mark).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Declared value range of a chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Reject ranges that cannot produce ticks.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let invalid = || GeometryError::InvalidRange {
            min: self.min,
            max: self.max,
            step: self.step,
        };

        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if !finite || self.step <= 0.0 || self.max < self.min {
            return Err(invalid());
        }

        // span can overflow to infinity even with finite bounds
        let intervals = (self.span() / self.step).ceil();
        if !intervals.is_finite() || intervals >= MAX_TICKS as f64 {
            return Err(invalid());
        }
        Ok(())
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Height above the chart floor for `value`.
    ///
    /// A zero-width range maps everything to 0.
    pub fn scaled_height(&self, value: f64, chart_height: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return 0.0;
        }
        (value - self.min) / span * chart_height
    }

    /// Number of y-axis ticks: `ceil(span / step) + 1`.
    ///
    /// Only meaningful for a range that passed [`ValueRange::validate`].
    pub fn tick_count(&self) -> usize {
        ((self.span() / self.step).ceil() as usize).saturating_add(1)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 5.0, 1.0)
    }
}

/// Chart-space dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
}

impl ChartFrame {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// y coordinate of the chart floor.
    pub fn floor(&self) -> f64 {
        -self.height / 2.0
    }

    /// x coordinate of the left edge of the plot area.
    pub fn left(&self) -> f64 {
        -self.width / 2.0
    }

    /// x coordinate of the y axis line.
    pub fn axis_x(&self) -> f64 {
        self.left() - AXIS_OFFSET
    }
}

/// One labeled tick on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Where the tick meets the axis.
    pub position: Point,
    /// The tick mark itself.
    pub mark: Segment,
    /// Text shown next to the tick.
    pub label: String,
    /// Numeric value for y ticks; `None` for time-keyed x ticks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// A vertical value axis with its ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxis {
    pub line: Segment,
    pub ticks: Vec<Tick>,
}

/// Format a tick value: whole numbers without decimals.
pub fn format_tick_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').to_string()
    }
}

/// Build the y axis for `range` inside `frame`.
///
/// Ticks run from `min` in steps of `step`; a final tick that would pass
/// `max` is clamped to it. A zero-width range yields a single tick at the
/// floor.
pub fn y_axis(range: &ValueRange, frame: &ChartFrame) -> Result<YAxis, GeometryError> {
    range.validate()?;

    let axis_x = frame.axis_x();
    let line = Segment::new(
        Point::new(axis_x, frame.floor()),
        Point::new(axis_x, frame.height / 2.0),
    );

    let ticks = (0..range.tick_count())
        .map(|i| {
            let value = (range.min + i as f64 * range.step).min(range.max);
            let y = frame.floor() + range.scaled_height(value, frame.height);
            let position = Point::new(axis_x, y);
            Tick {
                position,
                mark: Segment::new(position, Point::new(axis_x + Y_TICK_LENGTH, y)),
                label: format_tick_value(value),
                value: Some(value),
            }
        })
        .collect();

    Ok(YAxis { line, ticks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_validation() {
        assert!(ValueRange::new(0.0, 5.0, 1.0).validate().is_ok());
        assert!(ValueRange::new(2.0, 2.0, 1.0).validate().is_ok());
        assert!(ValueRange::new(0.0, 5.0, 0.0).validate().is_err());
        assert!(ValueRange::new(0.0, 5.0, -1.0).validate().is_err());
        assert!(ValueRange::new(5.0, 0.0, 1.0).validate().is_err());
        assert!(ValueRange::new(0.0, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_value_range_rejects_excessive_ticks() {
        let huge = ValueRange::new(0.0, 1e308, 1e-300);
        assert!(matches!(
            huge.validate(),
            Err(GeometryError::InvalidRange { .. })
        ));
        assert!(ValueRange::new(-1e308, 1e308, 1.0).validate().is_err());
        assert!(ValueRange::new(0.0, 1e9, 1e-3).validate().is_err());
        assert!(ValueRange::new(0.0, 10_000.0, 1.0).validate().is_err());
        assert!(ValueRange::new(0.0, 9_999.0, 1.0).validate().is_ok());

        let frame = ChartFrame::new(10.0, 4.0).unwrap();
        assert!(y_axis(&huge, &frame).is_err());
    }

    #[test]
    fn test_scaled_height() {
        let range = ValueRange::new(0.0, 5.0, 1.0);
        assert_eq!(range.scaled_height(0.0, 4.0), 0.0);
        assert_eq!(range.scaled_height(5.0, 4.0), 4.0);
        assert_eq!(range.scaled_height(2.5, 4.0), 2.0);

        let flat = ValueRange::new(3.0, 3.0, 1.0);
        assert_eq!(flat.scaled_height(10.0, 4.0), 0.0);
    }

    #[test]
    fn test_chart_frame() {
        let frame = ChartFrame::new(12.0, 5.0).unwrap();
        assert_eq!(frame.floor(), -2.5);
        assert_eq!(frame.left(), -6.0);
        assert_eq!(frame.axis_x(), -6.5);
        assert!(ChartFrame::new(0.0, 5.0).is_err());
        assert!(ChartFrame::new(12.0, -1.0).is_err());
    }

    #[test]
    fn test_y_axis_ticks() {
        let frame = ChartFrame::new(10.0, 4.0).unwrap();
        let axis = y_axis(&ValueRange::new(0.0, 5.0, 1.0), &frame).unwrap();

        assert_eq!(axis.ticks.len(), 6);
        let values: Vec<f64> = axis.ticks.iter().filter_map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(axis.ticks[0].position.y, -2.0);
        assert_eq!(axis.ticks[5].position.y, 2.0);
        assert_eq!(axis.ticks[5].label, "5");
        assert_eq!(axis.line.start, Point::new(-5.5, -2.0));
        assert_eq!(axis.line.end, Point::new(-5.5, 2.0));
        assert!((axis.ticks[0].mark.end.x + 5.3).abs() < 1e-9);
    }

    #[test]
    fn test_y_axis_uneven_step_clamps_last_tick() {
        let frame = ChartFrame::new(10.0, 4.0).unwrap();
        let axis = y_axis(&ValueRange::new(0.0, 5.0, 2.0), &frame).unwrap();

        let values: Vec<f64> = axis.ticks.iter().filter_map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 2.0, 4.0, 5.0]);
        assert_eq!(axis.ticks[3].position.y, 2.0);
    }

    #[test]
    fn test_y_axis_degenerate_range() {
        let frame = ChartFrame::new(10.0, 4.0).unwrap();
        let axis = y_axis(&ValueRange::new(3.0, 3.0, 1.0), &frame).unwrap();
        assert_eq!(axis.ticks.len(), 1);
        assert_eq!(axis.ticks[0].position.y, -2.0);
    }

    #[test]
    fn test_format_tick_value() {
        assert_eq!(format_tick_value(3.0), "3");
        assert_eq!(format_tick_value(0.5), "0.5");
        assert_eq!(format_tick_value(1.25), "1.25");
    }
}
