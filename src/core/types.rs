use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in screen space (+y down), anchored at its top-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Clamps a point into the rectangle's extent.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max().max(self.min()))
    }
}

/// Edge of the optional world boundary a body was pushed back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl BoundsEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundsEdge::Left => "left",
            BoundsEdge::Right => "right",
            BoundsEdge::Top => "top",
            BoundsEdge::Bottom => "bottom",
        }
    }

    /// Inward-facing unit normal of the edge.
    pub fn inward_normal(&self) -> Vec2 {
        match self {
            BoundsEdge::Left => Vec2::X,
            BoundsEdge::Right => Vec2::NEG_X,
            BoundsEdge::Top => Vec2::Y,
            BoundsEdge::Bottom => Vec2::NEG_Y,
        }
    }
}

impl fmt::Display for BoundsEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
