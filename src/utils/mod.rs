//! Utility helpers: the body arena, logging and step profiling.

pub mod allocator;
pub mod logging;
pub mod profiling;

pub use allocator::{Arena, BodyHandle};
pub use profiling::StepStats;
