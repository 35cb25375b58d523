use std::collections::{HashMap, HashSet};

use crate::{
    config::DEFAULT_BROADPHASE_CELL_SIZE,
    core::{rigidbody::RigidBody, types::Rect},
    utils::allocator::{Arena, BodyHandle},
};

/// Uniform grid spatial hash keyed by integer cell coordinates.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    grid: HashMap<(i32, i32), Vec<BodyHandle>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: sanitize_cell_size(cell_size),
            grid: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = sanitize_cell_size(cell_size);
    }

    fn world_to_grid(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Inserts `id` into every cell its bounding extent overlaps.
    pub fn insert(&mut self, id: BodyHandle, bounds: Rect) {
        let min_cell = self.world_to_grid(bounds.left(), bounds.top());
        let max_cell = self.world_to_grid(bounds.right(), bounds.bottom());

        for x in min_cell.0..=max_cell.0 {
            for y in min_cell.1..=max_cell.1 {
                self.grid.entry((x, y)).or_default().push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn occupied_cells(&self) -> usize {
        self.grid.len()
    }

    pub fn rebuild(&mut self, bodies: &Arena<RigidBody>) {
        self.clear();
        for id in bodies.ids() {
            if let Some(body) = bodies.get(id) {
                self.insert(id, body.aabb());
            }
        }
    }

    pub fn buckets(&self) -> impl Iterator<Item = &[BodyHandle]> + '_ {
        self.grid.values().map(Vec::as_slice)
    }
}

/// Broad phase driver returning candidate body pairs that share a grid cell.
#[derive(Debug, Clone)]
pub struct BroadPhase {
    grid: SpatialGrid,
}

impl Default for BroadPhase {
    fn default() -> Self {
        Self::new(DEFAULT_BROADPHASE_CELL_SIZE)
    }
}

impl BroadPhase {
    pub fn new(cell_size: f32) -> Self {
        Self {
            grid: SpatialGrid::new(cell_size),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.grid.set_cell_size(cell_size);
    }

    /// Rebuilds the grid from scratch and returns each unordered pair once,
    /// ordered by `(lower index, higher index)`. Pairs may be false
    /// positives; the narrow-phase rejects those.
    pub fn get_potential_pairs(&mut self, bodies: &Arena<RigidBody>) -> Vec<(BodyHandle, BodyHandle)> {
        self.grid.rebuild(bodies);

        let mut pairs = Vec::new();
        let mut checked = HashSet::new();

        for bucket in self.grid.buckets() {
            if bucket.len() < 2 {
                continue;
            }
            for (i, &a) in bucket.iter().enumerate() {
                for &b in &bucket[i + 1..] {
                    let pair_key = if a.index() < b.index() { (a, b) } else { (b, a) };
                    if checked.insert((pair_key.0.index(), pair_key.1.index())) {
                        pairs.push(pair_key);
                    }
                }
            }
        }

        pairs.sort_unstable_by_key(|(a, b)| (a.index(), b.index()));
        log::trace!(
            "broadphase: {} bodies, {} cells, {} candidate pairs",
            bodies.len(),
            self.grid.occupied_cells(),
            pairs.len()
        );
        pairs
    }
}

fn sanitize_cell_size(cell_size: f32) -> f32 {
    if cell_size > 0.0 && cell_size.is_finite() {
        cell_size
    } else {
        1.0
    }
}
