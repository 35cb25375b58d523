use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{shape::Shape, types::Rect};
use crate::utils::allocator::BodyHandle;

/// Core rigid body description storing shape, kinematic state and material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub id: BodyHandle,
    pub shape: Shape,
    pub velocity: Vec2,
    mass: f32,
    inverse_mass: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Exponential velocity decay per second.
    pub linear_damping: f32,
    is_static: bool,
    pub is_sensor: bool,
}

impl RigidBody {
    pub fn new(shape: Shape) -> Self {
        let mut body = Self {
            id: BodyHandle::default(),
            shape,
            velocity: Vec2::ZERO,
            mass: 1.0,
            inverse_mass: 1.0,
            restitution: 0.0,
            friction: 0.0,
            linear_damping: 0.0,
            is_static: false,
            is_sensor: false,
        };
        body.recompute_inverse_mass();
        body
    }

    pub fn circle(x: f32, y: f32, r: f32) -> Self {
        Self::new(Shape::circle(x, y, r))
    }

    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Shape::rect(x, y, w, h))
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.set_static(is_static);
        self
    }

    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.recompute_inverse_mass();
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
        self.recompute_inverse_mass();
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
    }

    pub fn position(&self) -> Vec2 {
        self.shape.position()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.shape.set_position(position);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    pub fn aabb(&self) -> Rect {
        self.shape.aabb()
    }

    fn recompute_inverse_mass(&mut self) {
        self.inverse_mass = if self.is_static || self.mass <= 0.0 || !self.mass.is_finite() {
            0.0
        } else {
            1.0 / self.mass
        };
    }
}
