use glam::Vec2;

/// Narrow-phase result for an overlapping pair.
///
/// `normal` is a unit vector pointing from the first shape toward the second
/// and `depth` is the non-negative penetration along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub depth: f32,
}

impl Contact {
    pub fn new(normal: Vec2, depth: f32) -> Self {
        Self { normal, depth }
    }

    /// Same contact seen from the other body.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}
