use glam::Vec2;

use crate::{collision::contact::Contact, core::rigidbody::RigidBody};

/// What the solver did with a contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairResponse {
    /// Both bodies are immovable; nothing was changed.
    Skipped,
    Resolved,
}

/// Pairwise contact resolver: positional correction, restitution impulse and
/// a simplified Coulomb friction impulse.
#[derive(Debug, Clone, Default)]
pub struct ContactSolver;

impl ContactSolver {
    const MIN_TANGENT_SPEED: f32 = 1e-6;

    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, body_a: &mut RigidBody, body_b: &mut RigidBody, contact: &Contact) -> PairResponse {
        if body_a.is_static() && body_b.is_static() {
            return PairResponse::Skipped;
        }
        let inv_mass_a = body_a.inverse_mass();
        let inv_mass_b = body_b.inverse_mass();
        let inv_mass_sum = inv_mass_a + inv_mass_b;
        if inv_mass_sum <= 0.0 {
            return PairResponse::Skipped;
        }

        let normal = contact.normal;
        Self::correct_position(body_a, body_b, contact, inv_mass_sum);

        let relative = body_b.velocity - body_a.velocity;
        let normal_speed = relative.dot(normal);
        if normal_speed < 0.0 {
            let restitution = body_a.restitution.min(body_b.restitution);
            let j = -(1.0 + restitution) * normal_speed / inv_mass_sum;
            Self::apply_impulse(body_a, body_b, normal * j);
        }

        Self::apply_friction(body_a, body_b, normal, inv_mass_sum);
        PairResponse::Resolved
    }

    /// Splits the penetration between the bodies by inverse-mass share.
    fn correct_position(
        body_a: &mut RigidBody,
        body_b: &mut RigidBody,
        contact: &Contact,
        inv_mass_sum: f32,
    ) {
        let move_a = body_a.inverse_mass() / inv_mass_sum * contact.depth;
        let move_b = body_b.inverse_mass() / inv_mass_sum * contact.depth;
        if !body_a.is_static() {
            body_a.translate(-contact.normal * move_a);
        }
        if !body_b.is_static() {
            body_b.translate(contact.normal * move_b);
        }
    }

    /// Tangential impulse sized to cancel `friction` times the tangential
    /// relative speed, capped at the full tangential speed. Not clamped to a
    /// friction cone.
    fn apply_friction(body_a: &mut RigidBody, body_b: &mut RigidBody, normal: Vec2, inv_mass_sum: f32) {
        let relative = body_b.velocity - body_a.velocity;
        let tangent = relative - normal * relative.dot(normal);
        let tangent_speed = tangent.length();
        if tangent_speed < Self::MIN_TANGENT_SPEED {
            return;
        }

        let friction = body_a.friction.max(body_b.friction);
        if friction <= 0.0 {
            return;
        }
        // Never more than what stops the sliding.
        let jt = -(tangent_speed * friction).min(tangent_speed) / inv_mass_sum;
        Self::apply_impulse(body_a, body_b, tangent / tangent_speed * jt);
    }

    fn apply_impulse(body_a: &mut RigidBody, body_b: &mut RigidBody, impulse: Vec2) {
        if !body_a.is_static() {
            body_a.velocity -= impulse * body_a.inverse_mass();
        }
        if !body_b.is_static() {
            body_b.velocity += impulse * body_b.inverse_mass();
        }
    }
}
