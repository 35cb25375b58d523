use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{core::rigidbody::RigidBody, utils::allocator::Arena};

/// Semi-implicit Euler integrator for non-static bodies.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    parallel: bool,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests rayon-backed integration. Ignored unless the `parallel`
    /// feature is compiled in.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    /// Gravity, then damping, then position. `dt` is in seconds.
    pub fn integrate_body(body: &mut RigidBody, gravity: Vec2, dt: f32) {
        if body.is_static() {
            return;
        }

        body.velocity += gravity * dt;
        if body.linear_damping > 0.0 {
            body.velocity *= (1.0 - body.linear_damping * dt).max(0.0);
        }
        let delta = body.velocity * dt;
        body.translate(delta);
    }

    pub fn step(&self, bodies: &mut Arena<RigidBody>, gravity: Vec2, dt: f32) {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                bodies
                    .par_iter_mut()
                    .for_each(|body| Self::integrate_body(body, gravity, dt));
                return;
            }
        }

        for body in bodies.iter_mut() {
            Self::integrate_body(body, gravity, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gravity_then_damping_then_position() {
        let mut body = RigidBody::rect(0.0, 0.0, 1.0, 1.0)
            .with_velocity(100.0, 0.0)
            .with_linear_damping(2.0);

        Integrator::integrate_body(&mut body, Vec2::ZERO, 0.05);

        assert_abs_diff_eq!(body.velocity.x, 90.0, epsilon = 1e-3);
        assert_abs_diff_eq!(body.position().x, 4.5, epsilon = 1e-3);
    }

    #[test]
    fn damping_never_reverses_velocity() {
        let mut body = RigidBody::circle(0.0, 0.0, 1.0)
            .with_velocity(10.0, -4.0)
            .with_linear_damping(100.0);

        Integrator::integrate_body(&mut body, Vec2::ZERO, 0.05);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn static_bodies_are_skipped() {
        let mut body = RigidBody::circle(1.0, 1.0, 1.0)
            .with_velocity(5.0, 5.0)
            .with_static(true);

        Integrator::integrate_body(&mut body, Vec2::new(0.0, 9.8), 0.1);
        assert_eq!(body.position(), Vec2::new(1.0, 1.0));
        assert_eq!(body.velocity, Vec2::new(5.0, 5.0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_integration_matches_sequential() {
        let make = || {
            let mut arena = Arena::new();
            for i in 0..64 {
                arena.insert(
                    RigidBody::circle(i as f32, 0.0, 0.5)
                        .with_velocity(i as f32 * 0.5, -1.0)
                        .with_linear_damping(0.1 * (i % 3) as f32),
                );
            }
            arena
        };

        let mut sequential = make();
        let mut parallel = make();
        let mut integrator = Integrator::new();
        integrator.step(&mut sequential, Vec2::new(0.0, 9.8), 1.0 / 60.0);
        integrator.set_parallel(true);
        integrator.step(&mut parallel, Vec2::new(0.0, 9.8), 1.0 / 60.0);

        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(a.position(), b.position());
            assert_eq!(a.velocity, b.velocity);
        }
    }
}
