//! Simulation dynamics: step scheduling, integration, terrain and contact resolution.

pub mod integrator;
pub mod scheduler;
pub mod solver;
pub mod terrain;

pub use integrator::Integrator;
pub use scheduler::{StepPlan, StepScheduler};
pub use solver::{ContactSolver, PairResponse};
pub use terrain::TerrainResolver;
