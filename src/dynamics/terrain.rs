use glam::Vec2;

use crate::{
    collision::{contact::Contact, narrowphase::NarrowPhase},
    core::{
        rigidbody::RigidBody,
        shape::Shape,
        types::{BoundsEdge, Rect},
    },
};

/// Pushes bodies back inside the world boundary and out of static terrain
/// tiles, reflecting velocity with the body's own restitution.
pub struct TerrainResolver;

impl TerrainResolver {
    const MIN_TANGENT_SPEED: f32 = 1e-6;

    /// Checks the four boundary edges independently, so a corner overlap
    /// reflects both velocity components in the same call. `on_hit` runs
    /// once per corrected edge, after the correction.
    pub fn resolve_bounds<F>(body: &mut RigidBody, bounds: &Rect, mut on_hit: F)
    where
        F: FnMut(&RigidBody, BoundsEdge),
    {
        if body.is_static() {
            return;
        }

        for edge in [BoundsEdge::Left, BoundsEdge::Right, BoundsEdge::Top, BoundsEdge::Bottom] {
            let extent = body.aabb();
            let correction = match edge {
                BoundsEdge::Left => bounds.left() - extent.left(),
                BoundsEdge::Right => bounds.right() - extent.right(),
                BoundsEdge::Top => bounds.top() - extent.top(),
                BoundsEdge::Bottom => bounds.bottom() - extent.bottom(),
            };
            let crossed = match edge {
                BoundsEdge::Left | BoundsEdge::Top => correction > 0.0,
                BoundsEdge::Right | BoundsEdge::Bottom => correction < 0.0,
            };
            if !crossed {
                continue;
            }

            let delta = match edge {
                BoundsEdge::Left | BoundsEdge::Right => Vec2::new(correction, 0.0),
                BoundsEdge::Top | BoundsEdge::Bottom => Vec2::new(0.0, correction),
            };
            body.translate(delta);
            Self::reflect_velocity(body, edge.inward_normal());
            on_hit(body, edge);
        }
    }

    /// Resolves `body` against every tile in order. Static bodies and
    /// sensors are left alone. `on_hit` receives the tile and the normal
    /// pointing from the body into the tile.
    pub fn resolve_static_rects<F>(body: &mut RigidBody, tiles: &[Rect], mut on_hit: F)
    where
        F: FnMut(&RigidBody, &Rect, Vec2),
    {
        if body.is_static() || body.is_sensor {
            return;
        }

        for tile in tiles {
            let contact = match Self::tile_contact(&body.shape, tile) {
                Some(contact) => contact,
                None => continue,
            };

            body.translate(-contact.normal * contact.depth);
            Self::reflect_velocity(body, contact.normal);
            Self::apply_tangential_damping(body, contact.normal);
            on_hit(body, tile, contact.normal);
        }
    }

    /// Same tests as body-body contacts with the tile on the box side.
    pub fn tile_contact(shape: &Shape, tile: &Rect) -> Option<Contact> {
        match shape {
            Shape::Circle(circle) => NarrowPhase::circle_box(circle, tile),
            Shape::Box(rect) => NarrowPhase::box_box(rect, tile),
        }
    }

    /// `v -= (1 + e) * (v . n) * n`
    pub fn reflect_velocity(body: &mut RigidBody, normal: Vec2) {
        let vn = body.velocity.dot(normal);
        body.velocity -= normal * ((1.0 + body.restitution) * vn);
    }

    /// Scales the tangential part of the velocity by `max(0, 1 - friction)`.
    fn apply_tangential_damping(body: &mut RigidBody, normal: Vec2) {
        let vn = body.velocity.dot(normal);
        let tangent = body.velocity - normal * vn;
        if tangent.length() < Self::MIN_TANGENT_SPEED {
            return;
        }
        let scale = (1.0 - body.friction).max(0.0);
        body.velocity = normal * vn + tangent * scale;
    }
}
