//! Planar Physics – a deterministic 2D rigid-body simulation core.
//!
//! Bodies are circles or axis-aligned boxes without orientation. Each
//! [`PhysicsWorld::step`] integrates motion, pushes bodies out of the world
//! boundary and static terrain, finds candidate pairs with a uniform spatial
//! hash, tests them exactly, and resolves contacts with impulses. Sensors
//! report overlaps without physical response, and [`PhysicsWorld::raycast`]
//! answers nearest-hit segment queries.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod events;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    broadphase::BroadPhase,
    contact::Contact,
    narrowphase::NarrowPhase,
    queries::{Raycast, RaycastHit, RaycastQuery},
};
pub use config::WorldConfig;
pub use core::{
    rigidbody::RigidBody,
    shape::{Circle, Shape},
    types::{BoundsEdge, Rect},
};
pub use dynamics::{
    integrator::Integrator,
    scheduler::{StepPlan, StepScheduler},
    solver::ContactSolver,
    terrain::TerrainResolver,
};
pub use events::{CollisionListener, EventCollector, PhysicsEvent, SensorListener};
pub use utils::{allocator::BodyHandle, profiling::StepStats};
pub use world::PhysicsWorld;
