//! Two-column legend layout.

use super::palette::Color;
use super::Point;
use serde::{Deserialize, Serialize};

/// Side length of a color swatch.
pub const SWATCH_SIZE: f64 = 0.3;

/// Vertical gap between rows.
pub const ROW_SPACING: f64 = 0.4;

/// Horizontal gap between the two columns.
pub const COLUMN_GAP: f64 = 1.0;

/// Gap between a swatch and its label.
pub const LABEL_GAP: f64 = 0.2;

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub swatch: Color,
    pub label: String,
    /// Swatch center, relative to the top-left swatch of the legend.
    pub swatch_center: Point,
    /// Left edge of the label text.
    pub label_anchor: Point,
}

/// Legend split into two side-by-side columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub columns: [Vec<LegendRow>; 2],
}

impl LegendLayout {
    pub fn rows(&self) -> impl Iterator<Item = &LegendRow> {
        self.columns.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns[0].len() + self.columns[1].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `labels` into two columns, the first holding `ceil(n/2)` rows.
///
/// `column_width` is the width reserved for the first column's labels;
/// the second column starts after it plus [`COLUMN_GAP`].
pub fn build_legend_rows<F>(labels: &[String], column_width: f64, color_of: F) -> LegendLayout
where
    F: Fn(usize, &str) -> Color,
{
    let split = labels.len().div_ceil(2);
    let second_x = SWATCH_SIZE + LABEL_GAP + column_width + COLUMN_GAP;

    let row = |index: usize, row_in_column: usize, column_x: f64| {
        let label = &labels[index];
        let y = -(row_in_column as f64) * (SWATCH_SIZE + ROW_SPACING);
        LegendRow {
            swatch: color_of(index, label),
            label: label.clone(),
            swatch_center: Point::new(column_x, y),
            label_anchor: Point::new(column_x + SWATCH_SIZE / 2.0 + LABEL_GAP, y),
        }
    };

    let first = (0..split).map(|i| row(i, i, 0.0)).collect();
    let second = (split..labels.len())
        .map(|i| row(i, i - split, second_x))
        .collect();

    LegendLayout {
        columns: [first, second],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette::{bar_color, Color};

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Brand{}", i)).collect()
    }

    #[test]
    fn test_balanced_split() {
        let legend = build_legend_rows(&labels(10), 1.5, |i, _| bar_color(i));
        assert_eq!(legend.columns[0].len(), 5);
        assert_eq!(legend.columns[1].len(), 5);
        assert_eq!(legend.columns[1][0].label, "Brand5");

        let legend = build_legend_rows(&labels(7), 1.5, |i, _| bar_color(i));
        assert_eq!(legend.columns[0].len(), 4);
        assert_eq!(legend.columns[1].len(), 3);
        assert_eq!(legend.len(), 7);
    }

    #[test]
    fn test_rows_keep_order_and_colors() {
        let legend = build_legend_rows(&labels(3), 1.0, |_, label| {
            if label == "Brand1" {
                Color::new("#000000")
            } else {
                Color::new("#FFFFFF")
            }
        });

        let order: Vec<&str> = legend.rows().map(|r| r.label.as_str()).collect();
        assert_eq!(order, vec!["Brand0", "Brand1", "Brand2"]);
        assert_eq!(legend.columns[0][1].swatch, Color::new("#000000"));
    }

    #[test]
    fn test_row_positions() {
        let legend = build_legend_rows(&labels(4), 2.0, |i, _| bar_color(i));

        assert_eq!(legend.columns[0][0].swatch_center, Point::new(0.0, 0.0));
        assert!((legend.columns[0][1].swatch_center.y + 0.7).abs() < 1e-9);
        assert!((legend.columns[1][0].swatch_center.x - 3.5).abs() < 1e-9);
        assert_eq!(legend.columns[1][0].swatch_center.y, 0.0);
        assert!((legend.columns[0][0].label_anchor.x - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_single_and_empty() {
        let legend = build_legend_rows(&labels(1), 1.0, |i, _| bar_color(i));
        assert_eq!(legend.columns[0].len(), 1);
        assert!(legend.columns[1].is_empty());

        let legend = build_legend_rows(&[], 1.0, |i, _| bar_color(i));
        assert!(legend.is_empty());
    }
}
