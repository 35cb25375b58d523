use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::types::Rect;

/// Circle positioned by its center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x - self.r, self.y - self.r, self.r * 2.0, self.r * 2.0)
    }
}

/// Geometry of a body. The variant is fixed for the lifetime of the body;
/// only the position fields change while simulating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    /// Axis-aligned box anchored at its top-left corner.
    Box(Rect),
}

impl Shape {
    pub fn circle(x: f32, y: f32, r: f32) -> Self {
        Shape::Circle(Circle::new(x, y, r))
    }

    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Shape::Box(Rect::new(x, y, w, h))
    }

    /// Reference point of the shape: the center for circles, the top-left
    /// corner for boxes.
    pub fn position(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.center(),
            Shape::Box(r) => r.min(),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Shape::Circle(c) => {
                c.x = position.x;
                c.y = position.y;
            }
            Shape::Box(r) => {
                r.x = position.x;
                r.y = position.y;
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    /// Axis-aligned bounding extent used by the broad-phase.
    pub fn aabb(&self) -> Rect {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Box(r) => *r,
        }
    }
}
