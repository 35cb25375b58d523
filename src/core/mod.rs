//! Core data: shapes, rectangles and rigid bodies.

pub mod types;
pub mod shape;
pub mod rigidbody;

pub use types::{BoundsEdge, Rect};
pub use shape::{Circle, Shape};
pub use rigidbody::RigidBody;
