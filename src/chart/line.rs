//! Line chart layout for time series.

use super::{y_axis, ChartFrame, Point, Segment, Tick, ValueRange, YAxis, AXIS_OFFSET, X_TICK_LENGTH};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Target number of labeled x ticks.
const X_LABEL_TARGET: usize = 10;

/// A value mapped into chart-space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub position: Point,
    pub source_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Axes drawn under a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAxes {
    pub x_axis: Segment,
    pub x_ticks: Vec<Tick>,
    pub y_axis: YAxis,
}

/// A polyline through evenly spaced points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayout {
    pub frame: ChartFrame,
    pub range: ValueRange,
    pub points: Vec<ChartPoint>,
    /// Whether the points form a drawable line (two or more points).
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axes: Option<LineAxes>,
}

impl LineLayout {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point positions in order, for renderers that draw polylines.
    pub fn vertices(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }
}

/// x coordinate of the `i`-th of `count` points spread across the frame.
fn spread_x(frame: &ChartFrame, i: usize, count: usize) -> f64 {
    if count < 2 {
        return frame.left();
    }
    frame.left() + (i as f64 / (count - 1) as f64) * frame.width
}

/// Lay out a time series as a line.
///
/// Points are spread evenly from `-width/2` to `width/2`. A single value
/// yields one unconnected point at the left edge; no values yield an empty
/// layout without axes.
pub fn layout_line(
    times: &[String],
    values: &[f64],
    range: ValueRange,
    width: f64,
    height: f64,
    with_axes: bool,
) -> Result<LineLayout, GeometryError> {
    if times.len() != values.len() {
        return Err(GeometryError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }

    let frame = ChartFrame::new(width, height)?;
    range.validate()?;

    let count = values.len();
    if count == 0 {
        return Ok(LineLayout {
            frame,
            range,
            points: Vec::new(),
            connected: false,
            axes: None,
        });
    }

    let points = times
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (time, &value))| ChartPoint {
            position: Point::new(
                spread_x(&frame, i, count),
                frame.floor() + range.scaled_height(value, height),
            ),
            source_value: value,
            label: Some(time.clone()),
        })
        .collect();

    let axes = if with_axes {
        Some(line_axes(times, &range, &frame)?)
    } else {
        None
    };

    Ok(LineLayout {
        frame,
        range,
        points,
        connected: count >= 2,
        axes,
    })
}

fn line_axes(times: &[String], range: &ValueRange, frame: &ChartFrame) -> Result<LineAxes, GeometryError> {
    let floor = frame.floor();
    let x_axis = Segment::new(
        Point::new(frame.left() - AXIS_OFFSET, floor),
        Point::new(frame.width / 2.0, floor),
    );

    let every = (times.len() / X_LABEL_TARGET).max(1);
    let x_ticks = times
        .iter()
        .enumerate()
        .step_by(every)
        .map(|(i, time)| {
            let position = Point::new(spread_x(frame, i, times.len()), floor);
            Tick {
                position,
                mark: Segment::new(position, Point::new(position.x, floor - X_TICK_LENGTH)),
                label: time.clone(),
                value: None,
            }
        })
        .collect();

    Ok(LineAxes {
        x_axis,
        x_ticks,
        y_axis: y_axis(range, frame)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("2020-{:02}", i % 12 + 1)).collect()
    }

    #[test]
    fn test_points_spread_across_width() {
        let layout = layout_line(
            &months(3),
            &[0.0, 2.5, 5.0],
            ValueRange::new(0.0, 5.0, 1.0),
            12.0,
            5.0,
            false,
        )
        .unwrap();

        let xs: Vec<f64> = layout.points.iter().map(|p| p.position.x).collect();
        let ys: Vec<f64> = layout.points.iter().map(|p| p.position.y).collect();
        assert_eq!(xs, vec![-6.0, 0.0, 6.0]);
        assert_eq!(ys, vec![-2.5, 0.0, 2.5]);
        assert!(layout.connected);
        assert!(layout.axes.is_none());
        assert_eq!(layout.points[1].label.as_deref(), Some("2020-02"));
    }

    #[test]
    fn test_single_point_is_unconnected() {
        let layout = layout_line(
            &months(1),
            &[4.0],
            ValueRange::new(0.0, 5.0, 1.0),
            12.0,
            5.0,
            true,
        )
        .unwrap();

        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].position.x, -6.0);
        assert!(!layout.connected);
        assert_eq!(layout.axes.unwrap().x_ticks.len(), 1);
    }

    #[test]
    fn test_empty_series() {
        let layout = layout_line(&[], &[], ValueRange::new(0.0, 5.0, 1.0), 12.0, 5.0, true).unwrap();
        assert!(layout.is_empty());
        assert!(!layout.connected);
        assert!(layout.axes.is_none());
    }

    #[test]
    fn test_length_mismatch() {
        let err = layout_line(&months(2), &[1.0], ValueRange::new(0.0, 5.0, 1.0), 12.0, 5.0, false)
            .unwrap_err();
        assert_eq!(err, GeometryError::LengthMismatch { times: 2, values: 1 });
    }

    #[test]
    fn test_axes_tick_frequency() {
        let times = months(25);
        let values = vec![3.0; 25];
        let layout = layout_line(&times, &values, ValueRange::new(0.0, 5.0, 1.0), 12.0, 5.0, true)
            .unwrap();
        let axes = layout.axes.unwrap();

        // Every 2nd point for 25 points: 0, 2, ..., 24.
        assert_eq!(axes.x_ticks.len(), 13);
        assert_eq!(axes.x_ticks[1].label, times[2]);
        assert_eq!(axes.x_ticks[12].position.x, 6.0);
        assert!((axes.x_ticks[0].mark.end.y + 2.7).abs() < 1e-9);
        assert_eq!(axes.y_axis.ticks.len(), 6);
        assert_eq!(axes.x_axis.start, Point::new(-6.5, -2.5));
        assert_eq!(axes.x_axis.end, Point::new(6.0, -2.5));
    }

    #[test]
    fn test_short_series_labels_every_point() {
        let layout = layout_line(&months(9), &[1.0; 9], ValueRange::new(0.0, 5.0, 1.0), 12.0, 5.0, true)
            .unwrap();
        assert_eq!(layout.axes.unwrap().x_ticks.len(), 9);
    }

    #[test]
    fn test_vertices() {
        let layout = layout_line(&months(2), &[0.0, 5.0], ValueRange::new(0.0, 5.0, 1.0), 4.0, 2.0, false)
            .unwrap();
        assert_eq!(
            layout.vertices(),
            vec![Point::new(-2.0, -1.0), Point::new(2.0, 1.0)]
        );
    }
}
