use glam::Vec2;

use crate::{
    collision::contact::Contact,
    core::{
        shape::{Circle, Shape},
        types::Rect,
    },
};

/// Exact overlap tests between circles and axis-aligned boxes.
///
/// Every test is a pure function of the two shapes and reports the normal
/// oriented from the first argument toward the second.
pub struct NarrowPhase;

impl NarrowPhase {
    const COINCIDENT_DISTANCE: f32 = 1e-6;
    const INSIDE_DISTANCE_SQ: f32 = 1e-9;

    pub fn collide(shape_a: &Shape, shape_b: &Shape) -> Option<Contact> {
        match (shape_a, shape_b) {
            (Shape::Circle(a), Shape::Circle(b)) => Self::circle_circle(a, b),
            (Shape::Box(a), Shape::Box(b)) => Self::box_box(a, b),
            (Shape::Circle(a), Shape::Box(b)) => Self::circle_box(a, b),
            (Shape::Box(a), Shape::Circle(b)) => Self::circle_box(b, a).map(Contact::flipped),
        }
    }

    pub fn circle_circle(a: &Circle, b: &Circle) -> Option<Contact> {
        let delta = b.center() - a.center();
        let dist_sq = delta.length_squared();
        let radius_sum = a.r + b.r;
        if dist_sq >= radius_sum * radius_sum {
            return None;
        }

        let dist = dist_sq.sqrt();
        if dist > Self::COINCIDENT_DISTANCE {
            Some(Contact::new(delta / dist, radius_sum - dist))
        } else {
            Some(Contact::new(Vec2::X, radius_sum))
        }
    }

    pub fn box_box(a: &Rect, b: &Rect) -> Option<Contact> {
        if !a.intersects(b) {
            return None;
        }

        let overlap_x1 = a.right() - b.left();
        let overlap_x2 = b.right() - a.left();
        let overlap_y1 = a.bottom() - b.top();
        let overlap_y2 = b.bottom() - a.top();
        let min_overlap_x = overlap_x1.min(overlap_x2);
        let min_overlap_y = overlap_y1.min(overlap_y2);

        // The smaller of the two overlaps tells which side `b` sits on.
        if min_overlap_x < min_overlap_y {
            let dir = if overlap_x1 < overlap_x2 { 1.0 } else { -1.0 };
            Some(Contact::new(Vec2::new(dir, 0.0), min_overlap_x))
        } else {
            let dir = if overlap_y1 < overlap_y2 { 1.0 } else { -1.0 };
            Some(Contact::new(Vec2::new(0.0, dir), min_overlap_y))
        }
    }

    /// Circle against box, normal pointing from the circle into the box.
    /// Touching counts as contact.
    pub fn circle_box(circle: &Circle, rect: &Rect) -> Option<Contact> {
        let center = circle.center();
        let closest = rect.closest_point(center);
        let delta = closest - center;
        let dist_sq = delta.length_squared();
        if dist_sq > circle.r * circle.r {
            return None;
        }

        if dist_sq > Self::INSIDE_DISTANCE_SQ {
            let dist = dist_sq.sqrt();
            return Some(Contact::new(delta / dist, circle.r - dist));
        }

        let (normal, depth) = Self::nearest_edge_push(center, rect);
        Some(Contact::new(normal, depth))
    }

    /// Fallback for a point lying inside `rect`: the normal points from the
    /// point toward the box interior across the nearest edge, so moving the
    /// point by `-normal * depth` puts it on that edge. Ties resolve in
    /// left, right, top, bottom order.
    pub fn nearest_edge_push(point: Vec2, rect: &Rect) -> (Vec2, f32) {
        let candidates = [
            (point.x - rect.left(), Vec2::X),
            (rect.right() - point.x, Vec2::NEG_X),
            (point.y - rect.top(), Vec2::Y),
            (rect.bottom() - point.y, Vec2::NEG_Y),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        (best.1, best.0)
    }
}
