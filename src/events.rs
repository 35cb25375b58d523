//! Listener traits invoked synchronously while stepping, plus a ready-made
//! event log implementing both.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        rigidbody::RigidBody,
        types::{BoundsEdge, Rect},
    },
    utils::allocator::BodyHandle,
};

/// Receives physical contacts. Every method defaults to a no-op.
pub trait CollisionListener: Send {
    /// A resolved body-body contact; `normal` points from `a` toward `b`.
    fn on_bodies_collide(&mut self, _a: &RigidBody, _b: &RigidBody, _normal: Vec2) {}

    fn on_bounds_collide(&mut self, _body: &RigidBody, _edge: BoundsEdge) {}

    /// `normal` points from the body into the tile.
    fn on_static_collide(&mut self, _body: &RigidBody, _tile: &Rect, _normal: Vec2) {}
}

/// Receives sensor overlaps.
pub trait SensorListener: Send {
    fn on_trigger(&mut self, sensor: &RigidBody, other: &RigidBody);
}

impl<F> SensorListener for F
where
    F: FnMut(&RigidBody, &RigidBody) + Send,
{
    fn on_trigger(&mut self, sensor: &RigidBody, other: &RigidBody) {
        self(sensor, other)
    }
}

/// Record of a single listener callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhysicsEvent {
    BodiesCollide {
        a: BodyHandle,
        b: BodyHandle,
        normal: Vec2,
    },
    BoundsCollide {
        body: BodyHandle,
        edge: BoundsEdge,
    },
    StaticCollide {
        body: BodyHandle,
        tile: Rect,
        normal: Vec2,
    },
    Trigger {
        sensor: BodyHandle,
        other: BodyHandle,
    },
}

/// Shared, cloneable event log. Install one clone as a listener and keep
/// another to [`drain`](EventCollector::drain) after each step.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<PhysicsEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PhysicsEvent) {
        self.events.lock().push(event);
    }

    pub fn drain(&self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn snapshot(&self) -> Vec<PhysicsEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl CollisionListener for EventCollector {
    fn on_bodies_collide(&mut self, a: &RigidBody, b: &RigidBody, normal: Vec2) {
        self.push(PhysicsEvent::BodiesCollide {
            a: a.id,
            b: b.id,
            normal,
        });
    }

    fn on_bounds_collide(&mut self, body: &RigidBody, edge: BoundsEdge) {
        self.push(PhysicsEvent::BoundsCollide {
            body: body.id,
            edge,
        });
    }

    fn on_static_collide(&mut self, body: &RigidBody, tile: &Rect, normal: Vec2) {
        self.push(PhysicsEvent::StaticCollide {
            body: body.id,
            tile: *tile,
            normal,
        });
    }
}

impl SensorListener for EventCollector {
    fn on_trigger(&mut self, sensor: &RigidBody, other: &RigidBody) {
        self.push(PhysicsEvent::Trigger {
            sensor: sensor.id,
            other: other.id,
        });
    }
}
