//! Bar chart layout.

use super::palette::{bar_color, Color};
use super::{y_axis, ChartFrame, Point, ValueRange, YAxis};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Fraction of a slot covered by its bar.
pub const BAR_WIDTH_RATIO: f64 = 0.6;

/// Gap between a bar's floor and its name label.
const NAME_LABEL_GAP: f64 = 0.1;

/// Gap between a bar's top and its value label.
const VALUE_LABEL_GAP: f64 = 0.15;

/// One bar, positioned in chart-space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Slot index.
    pub index: usize,
    /// Category label drawn under the bar.
    pub label: String,
    /// Source value.
    pub value: f64,
    /// Value text drawn above the bar.
    pub value_text: String,
    pub color: Color,
    /// Center of the bar rectangle.
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Anchor for the category label (top-center of the label).
    pub label_anchor: Point,
    /// Anchor for the value label (bottom-center of the label).
    pub value_anchor: Point,
}

impl Bar {
    /// Midpoint of the bar's base.
    pub fn base(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.height / 2.0)
    }
}

/// A complete bar chart: bars plus the y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub frame: ChartFrame,
    pub range: ValueRange,
    /// Width of one slot.
    pub slot_width: f64,
    pub bars: Vec<Bar>,
    pub y_axis: YAxis,
}

impl BarLayout {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Lay out one bar per value in equal-width slots.
///
/// Labels default to the slot index and colors fall back to the bar
/// palette when `colors` is missing or shorter than `values`.
pub fn layout_bars(
    values: &[f64],
    labels: Option<&[String]>,
    colors: Option<&[Color]>,
    range: ValueRange,
    width: f64,
    height: f64,
) -> Result<BarLayout, GeometryError> {
    let frame = ChartFrame::new(width, height)?;
    let y_axis = y_axis(&range, &frame)?;

    let slot_width = if values.is_empty() {
        0.0
    } else {
        width / values.len() as f64
    };
    let bar_width = slot_width * BAR_WIDTH_RATIO;

    let bars = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let bar_height = range.scaled_height(value, height);
            let x = frame.left() + slot_width * i as f64 + slot_width / 2.0;

            let label = labels
                .and_then(|l| l.get(i))
                .cloned()
                .unwrap_or_else(|| i.to_string());
            let color = colors
                .and_then(|c| c.get(i))
                .cloned()
                .unwrap_or_else(|| bar_color(i));

            Bar {
                index: i,
                label,
                value,
                value_text: format!("{:.3}", value),
                color,
                center: Point::new(x, frame.floor() + bar_height / 2.0),
                width: bar_width,
                height: bar_height,
                label_anchor: Point::new(x, frame.floor() - NAME_LABEL_GAP),
                value_anchor: Point::new(x, frame.floor() + bar_height + VALUE_LABEL_GAP),
            }
        })
        .collect();

    Ok(BarLayout {
        frame,
        range,
        slot_width,
        bars,
        y_axis,
    })
}
