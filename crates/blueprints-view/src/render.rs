//! Blueprint to draw-operation conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use blueprints_core::{Blueprint, Point};

/// Radius of the marker drawn at every blueprint point.
pub const MARKER_RADIUS: f64 = 3.0;

/// A surface-independent drawing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Start the path at a point.
    MoveTo { x: f64, y: f64 },
    /// Extend the path with a straight segment.
    LineTo { x: f64, y: f64 },
    /// Filled circle centered on a point.
    MarkAt { x: f64, y: f64, radius: f64 },
}

impl DrawOp {
    pub fn is_path(&self) -> bool {
        matches!(self, Self::MoveTo { .. } | Self::LineTo { .. })
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::MarkAt { .. })
    }
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { x, y } => write!(f, "M {x} {y}"),
            Self::LineTo { x, y } => write!(f, "L {x} {y}"),
            Self::MarkAt { x, y, radius } => write!(f, "C {x} {y} {radius}"),
        }
    }
}

/// Path through every point in order, then one marker per point.
///
/// Markers come after all path operations so they sit on top of the line.
/// An empty blueprint yields no operations.
pub fn to_draw_ops(blueprint: &Blueprint) -> Vec<DrawOp> {
    let points = &blueprint.points;
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut ops = Vec::with_capacity(points.len() * 2);
    ops.push(DrawOp::MoveTo { x: first.x, y: first.y });
    ops.extend(rest.iter().map(|&Point { x, y }| DrawOp::LineTo { x, y }));
    ops.extend(points.iter().map(|&Point { x, y }| DrawOp::MarkAt {
        x,
        y,
        radius: MARKER_RADIUS,
    }));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(coords: &[(f64, f64)]) -> Blueprint {
        Blueprint::new("johnconnor", "house", coords.iter().copied().map(Point::from).collect())
    }

    #[test]
    fn empty_blueprint_renders_nothing() {
        assert!(to_draw_ops(&bp(&[])).is_empty());
    }

    #[test]
    fn single_point_is_move_and_marker() {
        let ops = to_draw_ops(&bp(&[(5.0, 6.0)]));
        assert_eq!(
            ops,
            vec![
                DrawOp::MoveTo { x: 5.0, y: 6.0 },
                DrawOp::MarkAt { x: 5.0, y: 6.0, radius: MARKER_RADIUS },
            ]
        );
    }

    #[test]
    fn house_emits_path_then_markers() {
        let ops = to_draw_ops(&bp(&[
            (150.0, 120.0),
            (215.0, 115.0),
            (340.0, 240.0),
            (15.0, 215.0),
        ]));
        assert_eq!(
            ops,
            vec![
                DrawOp::MoveTo { x: 150.0, y: 120.0 },
                DrawOp::LineTo { x: 215.0, y: 115.0 },
                DrawOp::LineTo { x: 340.0, y: 240.0 },
                DrawOp::LineTo { x: 15.0, y: 215.0 },
                DrawOp::MarkAt { x: 150.0, y: 120.0, radius: 3.0 },
                DrawOp::MarkAt { x: 215.0, y: 115.0, radius: 3.0 },
                DrawOp::MarkAt { x: 340.0, y: 240.0, radius: 3.0 },
                DrawOp::MarkAt { x: 15.0, y: 215.0, radius: 3.0 },
            ]
        );
    }

    #[test]
    fn op_counts_for_any_length() {
        for n in 1..=20usize {
            let coords: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, (i * i) as f64)).collect();
            let ops = to_draw_ops(&bp(&coords));

            let moves = ops.iter().filter(|op| matches!(op, DrawOp::MoveTo { .. })).count();
            let lines = ops.iter().filter(|op| matches!(op, DrawOp::LineTo { .. })).count();
            let marks = ops.iter().filter(|op| op.is_marker()).count();
            assert_eq!((moves, lines, marks), (1, n - 1, n), "n = {n}");

            let first_marker = ops.iter().position(DrawOp::is_marker).unwrap();
            assert!(ops[..first_marker].iter().all(DrawOp::is_path));
            assert!(ops[first_marker..].iter().all(DrawOp::is_marker));
        }
    }

    #[test]
    fn repeated_points_are_not_collapsed() {
        let ops = to_draw_ops(&bp(&[(1.0, 1.0), (1.0, 1.0)]));
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn display_and_json_forms() {
        assert_eq!(DrawOp::MoveTo { x: 1.0, y: 2.5 }.to_string(), "M 1 2.5");
        assert_eq!(
            DrawOp::MarkAt { x: 1.0, y: 2.0, radius: 3.0 }.to_string(),
            "C 1 2 3"
        );
        let json = serde_json::to_value(DrawOp::LineTo { x: 4.0, y: 5.0 }).unwrap();
        assert_eq!(json, serde_json::json!({"op": "line_to", "x": 4.0, "y": 5.0}));
    }
}
