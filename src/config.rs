//! Global configuration constants and the serializable world configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::Rect;

/// Default gravity vector (no gravity; screen space is +y down).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 0.0];

/// Default edge length of a broad-phase grid cell, in world units.
pub const DEFAULT_BROADPHASE_CELL_SIZE: f32 = 128.0;

/// Frame deltas above this many milliseconds are clamped.
pub const DEFAULT_MAX_STEP_MS: f32 = 50.0;

/// Substep budget per `step` call in fixed-step mode.
pub const DEFAULT_MAX_SUB_STEPS: u32 = 8;

/// Everything a [`PhysicsWorld`](crate::world::PhysicsWorld) can be
/// configured with. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: Vec2,
    /// Optional world boundary; `None` leaves the world unbounded.
    pub bounds: Option<Rect>,
    pub static_rects: Vec<Rect>,
    pub broadphase_cell_size: f32,
    /// `0` disables the clamp.
    pub max_step_ms: f32,
    /// `0` selects variable-step mode.
    pub fixed_step_ms: f32,
    pub max_sub_steps: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            bounds: None,
            static_rects: Vec::new(),
            broadphase_cell_size: DEFAULT_BROADPHASE_CELL_SIZE,
            max_step_ms: DEFAULT_MAX_STEP_MS,
            fixed_step_ms: 0.0,
            max_sub_steps: DEFAULT_MAX_SUB_STEPS,
        }
    }
}

impl WorldConfig {
    pub fn with_gravity(mut self, gx: f32, gy: f32) -> Self {
        self.gravity = Vec2::new(gx, gy);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_static_rect(mut self, rect: Rect) -> Self {
        self.static_rects.push(rect);
        self
    }

    pub fn with_fixed_step(mut self, step_ms: f32, max_sub_steps: u32) -> Self {
        self.fixed_step_ms = step_ms;
        self.max_sub_steps = max_sub_steps;
        self
    }
}
