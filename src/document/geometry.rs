//! Path geometry as read from the host document.
//!
//! These are immutable snapshots: the dedup engine never builds or edits
//! geometry, it only reads control points and asks the host to remove items.

use serde::{Deserialize, Serialize};

/// A coordinate pair in document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anchor behavior of a control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Handles move independently.
    #[default]
    Corner,
    /// Handles are kept collinear through the anchor.
    Smooth,
}

impl PointKind {
    /// Raw tag used in fingerprints. Never rounded or localized.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Corner => "corner",
            Self::Smooth => "smooth",
        }
    }
}

/// One anchor with its incoming and outgoing Bézier handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub anchor: Point2D,
    /// Incoming ("left") direction handle.
    pub in_handle: Point2D,
    /// Outgoing ("right") direction handle.
    pub out_handle: Point2D,
    #[serde(default)]
    pub kind: PointKind,
}

impl ControlPoint {
    /// A corner point whose handles sit on the anchor (a straight segment joint).
    #[must_use]
    pub fn corner(x: f64, y: f64) -> Self {
        let anchor = Point2D::new(x, y);
        Self {
            anchor,
            in_handle: anchor,
            out_handle: anchor,
            kind: PointKind::Corner,
        }
    }

    /// A smooth point with explicit handles.
    #[must_use]
    pub fn smooth(anchor: Point2D, in_handle: Point2D, out_handle: Point2D) -> Self {
        Self {
            anchor,
            in_handle,
            out_handle,
            kind: PointKind::Smooth,
        }
    }
}

/// One continuous outline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimpleShape {
    #[serde(default)]
    pub points: Vec<ControlPoint>,
    #[serde(default)]
    pub closed: bool,
}

impl SimpleShape {
    #[must_use]
    pub fn new(points: Vec<ControlPoint>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Closed polygon through the given corner points.
    #[must_use]
    pub fn polygon(corners: &[(f64, f64)]) -> Self {
        Self::new(
            corners
                .iter()
                .map(|&(x, y)| ControlPoint::corner(x, y))
                .collect(),
            true,
        )
    }

    /// Axis-aligned rectangle, drawn clockwise from the top-left corner.
    #[must_use]
    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::polygon(&[
            (left, top),
            (left + width, top),
            (left + width, top + height),
            (left, top + height),
        ])
    }

    /// Four-point Bézier approximation of a circle.
    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        // Handle length for a quarter-circle cubic.
        let k = radius * 0.552_284_749_8;
        let points = vec![
            ControlPoint::smooth(
                Point2D::new(cx, cy - radius),
                Point2D::new(cx - k, cy - radius),
                Point2D::new(cx + k, cy - radius),
            ),
            ControlPoint::smooth(
                Point2D::new(cx + radius, cy),
                Point2D::new(cx + radius, cy - k),
                Point2D::new(cx + radius, cy + k),
            ),
            ControlPoint::smooth(
                Point2D::new(cx, cy + radius),
                Point2D::new(cx + k, cy + radius),
                Point2D::new(cx - k, cy + radius),
            ),
            ControlPoint::smooth(
                Point2D::new(cx - radius, cy),
                Point2D::new(cx - radius, cy + k),
                Point2D::new(cx - radius, cy - k),
            ),
        ];
        Self::new(points, true)
    }

    /// Whether this outline has any control points at all.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        !self.points.is_empty()
    }

    /// Same outline with its control points in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self::new(points, self.closed)
    }
}
