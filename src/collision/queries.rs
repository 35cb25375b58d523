use glam::Vec2;

use crate::{
    core::{
        rigidbody::RigidBody,
        shape::{Circle, Shape},
        types::Rect,
    },
    utils::allocator::{Arena, BodyHandle},
};

/// Nearest intersection of a segment with a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub body: BodyHandle,
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
}

/// Segment query from `from` to `to`; hits are only reported on the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    pub from: Vec2,
    pub to: Vec2,
}

impl RaycastQuery {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    fn delta(&self) -> Vec2 {
        self.to - self.from
    }
}

pub struct Raycast;

impl Raycast {
    /// Closest hit across all bodies, or `None` for a zero-length segment.
    pub fn cast(query: &RaycastQuery, bodies: &Arena<RigidBody>) -> Option<RaycastHit> {
        Self::cast_with_filter(query, bodies, |_| true)
    }

    /// Like [`Raycast::cast`], skipping bodies for which `filter` returns false.
    /// Equal distances resolve to the body that comes first in arena order.
    pub fn cast_with_filter<F>(
        query: &RaycastQuery,
        bodies: &Arena<RigidBody>,
        mut filter: F,
    ) -> Option<RaycastHit>
    where
        F: FnMut(&RigidBody) -> bool,
    {
        let segment_length = query.delta().length();
        if segment_length == 0.0 || !segment_length.is_finite() {
            return None;
        }

        let mut best: Option<RaycastHit> = None;
        for id in bodies.ids() {
            let body = match bodies.get(id) {
                Some(b) => b,
                None => continue,
            };
            if !filter(body) {
                continue;
            }

            if let Some(hit) = Self::ray_shape_test(query, &body.shape, id, segment_length) {
                let closer = best.map_or(true, |current| hit.distance < current.distance);
                if closer {
                    best = Some(hit);
                }
            }
        }
        best
    }

    pub fn ray_shape_test(
        query: &RaycastQuery,
        shape: &Shape,
        body: BodyHandle,
        segment_length: f32,
    ) -> Option<RaycastHit> {
        match shape {
            Shape::Circle(circle) => Self::ray_circle(query, circle).map(|t| {
                let point = query.from + query.delta() * t;
                RaycastHit {
                    body,
                    point,
                    normal: (point - circle.center()).normalize_or_zero(),
                    distance: t * segment_length,
                }
            }),
            Shape::Box(rect) => Self::ray_aabb(query, rect).map(|(t, normal)| {
                let point = query.from + query.delta() * t;
                RaycastHit {
                    body,
                    point,
                    normal,
                    distance: (point - query.from).length(),
                }
            }),
        }
    }

    /// Smallest segment parameter in `[0, 1]` where the segment meets the
    /// circle boundary.
    fn ray_circle(query: &RaycastQuery, circle: &Circle) -> Option<f32> {
        let d = query.delta();
        let f = query.from - circle.center();
        let a = d.length_squared();
        let b = 2.0 * f.dot(d);
        let c = f.length_squared() - circle.r * circle.r;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        [t1, t2]
            .into_iter()
            .filter(|t| (0.0..=1.0).contains(t))
            .reduce(f32::min)
    }

    /// Slab test over the segment parameter range `[0, 1]`. The normal comes
    /// from the axis that produced the latest entry; a segment starting
    /// inside the box reports `t = 0` with a zero normal.
    fn ray_aabb(query: &RaycastQuery, rect: &Rect) -> Option<(f32, Vec2)> {
        let d = query.delta();
        let min = rect.min();
        let max = rect.max();
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        let mut normal = Vec2::ZERO;

        for axis in 0..2 {
            let origin = query.from[axis];
            let dir = d[axis];

            if dir == 0.0 {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / dir;
            let t1 = (min[axis] - origin) * inv_dir;
            let t2 = (max[axis] - origin) * inv_dir;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_min {
                t_min = near;
                normal = Vec2::ZERO;
                normal[axis] = if t1 < t2 { -1.0 } else { 1.0 };
            }
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        if !(0.0..=1.0).contains(&t_min) {
            return None;
        }
        Some((t_min, normal))
    }
}
