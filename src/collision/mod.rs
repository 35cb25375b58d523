//! Collision detection modules: broad-phase, narrow-phase, contacts and queries.

pub mod broadphase;
pub mod narrowphase;
pub mod contact;
pub mod queries;

pub use broadphase::{BroadPhase, SpatialGrid};
pub use contact::Contact;
pub use narrowphase::NarrowPhase;
pub use queries::{Raycast, RaycastHit, RaycastQuery};
