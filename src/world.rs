use glam::Vec2;

use crate::{
    collision::{
        broadphase::BroadPhase,
        narrowphase::NarrowPhase,
        queries::{Raycast, RaycastHit, RaycastQuery},
    },
    config::WorldConfig,
    core::{rigidbody::RigidBody, types::Rect},
    dynamics::{
        integrator::Integrator,
        scheduler::StepScheduler,
        solver::{ContactSolver, PairResponse},
        terrain::TerrainResolver,
    },
    events::{CollisionListener, SensorListener},
    utils::{
        allocator::{Arena, BodyHandle},
        logging::{warn_coerced, ScopedTimer},
        profiling::{PhaseTimer, StepStats},
    },
};

/// Central simulation container: owns the bodies, terrain, configuration and
/// listeners, and advances them with [`PhysicsWorld::step`].
///
/// The world is single-threaded. It is `Send`, so a host may move it to a
/// dedicated simulation thread or wrap it in a mutex, but calls must be
/// serialized by the caller.
pub struct PhysicsWorld {
    bodies: Arena<RigidBody>,
    gravity: Vec2,
    bounds: Option<Rect>,
    static_rects: Vec<Rect>,
    broadphase: BroadPhase,
    scheduler: StepScheduler,
    integrator: Integrator,
    solver: ContactSolver,
    collision_listener: Option<Box<dyn CollisionListener>>,
    sensor_listener: Option<Box<dyn SensorListener>>,
    stats: StepStats,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Builds a world from `config`, coercing invalid values the same way
    /// the individual setters do.
    pub fn with_config(config: WorldConfig) -> Self {
        let mut world = Self {
            bodies: Arena::new(),
            gravity: config.gravity,
            bounds: config.bounds,
            static_rects: config.static_rects,
            broadphase: BroadPhase::default(),
            scheduler: StepScheduler::new(),
            integrator: Integrator::new(),
            solver: ContactSolver::new(),
            collision_listener: None,
            sensor_listener: None,
            stats: StepStats::default(),
        };
        world.set_broadphase_cell_size(config.broadphase_cell_size);
        world.set_max_step_ms(config.max_step_ms);
        world.set_fixed_time_step_ms(config.fixed_step_ms, config.max_sub_steps);
        world
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> WorldConfig {
        WorldConfig {
            gravity: self.gravity,
            bounds: self.bounds,
            static_rects: self.static_rects.clone(),
            broadphase_cell_size: self.broadphase.cell_size(),
            max_step_ms: self.scheduler.max_step_ms(),
            fixed_step_ms: self.scheduler.fixed_step_ms(),
            max_sub_steps: self.scheduler.max_sub_steps(),
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let id = self.bodies.insert(body);
        if let Some(stored) = self.bodies.get_mut(id) {
            stored.id = id;
        }
        id
    }

    /// Removes a body. Unknown or already removed handles are ignored.
    pub fn remove_body(&mut self, id: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(id)
    }

    pub fn body(&self, id: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> + '_ {
        self.bodies.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies.ids()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn set_gravity(&mut self, gx: f32, gy: f32) {
        self.gravity = Vec2::new(gx, gy);
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn add_static_rect(&mut self, rect: Rect) {
        self.static_rects.push(rect);
    }

    pub fn clear_static_rects(&mut self) {
        self.static_rects.clear();
    }

    pub fn static_rects(&self) -> &[Rect] {
        &self.static_rects
    }

    pub fn set_broadphase_cell_size(&mut self, size: f32) {
        self.broadphase.set_cell_size(size);
        if self.broadphase.cell_size() != size {
            warn_coerced("broadphase cell size", size, self.broadphase.cell_size());
        }
    }

    pub fn broadphase_cell_size(&self) -> f32 {
        self.broadphase.cell_size()
    }

    /// Largest frame delta a single `step` accepts; `0` disables the clamp.
    pub fn set_max_step_ms(&mut self, ms: f32) {
        self.scheduler.set_max_step_ms(ms);
        if ms != 0.0 && self.scheduler.max_step_ms() != ms {
            warn_coerced("max step ms", ms, self.scheduler.max_step_ms());
        }
    }

    pub fn max_step_ms(&self) -> f32 {
        self.scheduler.max_step_ms()
    }

    /// Enables fixed-step mode with `step_ms` substeps, or variable-step
    /// mode when `step_ms` is `0`.
    pub fn set_fixed_time_step_ms(&mut self, step_ms: f32, max_sub_steps: u32) {
        self.scheduler.set_fixed_step_ms(step_ms, max_sub_steps);
        if step_ms != 0.0 && self.scheduler.fixed_step_ms() != step_ms {
            warn_coerced("fixed step ms", step_ms, self.scheduler.fixed_step_ms());
        }
        if max_sub_steps == 0 {
            warn_coerced("max sub steps", max_sub_steps, self.scheduler.max_sub_steps());
        }
    }

    pub fn fixed_time_step_ms(&self) -> f32 {
        self.scheduler.fixed_step_ms()
    }

    pub fn max_sub_steps(&self) -> u32 {
        self.scheduler.max_sub_steps()
    }

    /// Time carried to the next `step` in fixed-step mode.
    pub fn accumulator_ms(&self) -> f32 {
        self.scheduler.accumulator_ms()
    }

    pub fn set_collision_listener<L>(&mut self, listener: L)
    where
        L: CollisionListener + 'static,
    {
        self.collision_listener = Some(Box::new(listener));
    }

    pub fn clear_collision_listener(&mut self) {
        self.collision_listener = None;
    }

    pub fn set_sensor_listener<L>(&mut self, listener: L)
    where
        L: SensorListener + 'static,
    {
        self.sensor_listener = Some(Box::new(listener));
    }

    pub fn clear_sensor_listener(&mut self) {
        self.sensor_listener = None;
    }

    /// Integrates bodies on the rayon pool when the `parallel` feature is
    /// enabled. Results are identical to the sequential path.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.integrator.is_parallel()
    }

    pub fn last_step_stats(&self) -> &StepStats {
        &self.stats
    }

    /// Advances the simulation by `delta_ms` milliseconds, running as many
    /// substeps as the scheduler allows. Listener callbacks fire inline.
    pub fn step(&mut self, delta_ms: f32) {
        let _timer = ScopedTimer::new("world::step");
        let mut stats = StepStats::default();
        let start = std::time::Instant::now();

        let plan = self.scheduler.advance(delta_ms);
        stats.substeps = plan.substeps;
        stats.discarded_ms = plan.discarded_ms;
        for _ in 0..plan.substeps {
            self.step_once(plan.substep_ms, &mut stats);
        }

        stats.body_count = self.bodies.len();
        stats.total_time = start.elapsed();
        self.stats = stats;
    }

    fn step_once(&mut self, step_ms: f32, stats: &mut StepStats) {
        let dt = step_ms / 1000.0;
        if dt <= 0.0 {
            return;
        }

        {
            let _timer = PhaseTimer::new(&mut stats.integrator_time);
            self.integrator.step(&mut self.bodies, self.gravity, dt);
        }
        {
            let _timer = PhaseTimer::new(&mut stats.terrain_time);
            self.resolve_terrain();
        }

        let pairs = {
            let _timer = PhaseTimer::new(&mut stats.broad_phase_time);
            self.broadphase.get_potential_pairs(&self.bodies)
        };
        stats.candidate_pairs += pairs.len();

        let _timer = PhaseTimer::new(&mut stats.narrow_phase_time);
        for (id_a, id_b) in pairs {
            let (body_a, body_b) = match self.bodies.get2_mut(id_a, id_b) {
                Some(pair) => pair,
                None => continue,
            };
            let contact = match NarrowPhase::collide(&body_a.shape, &body_b.shape) {
                Some(contact) => contact,
                None => continue,
            };
            stats.contacts += 1;

            if body_a.is_sensor || body_b.is_sensor {
                stats.sensor_triggers += usize::from(body_a.is_sensor) + usize::from(body_b.is_sensor);
                if let Some(listener) = self.sensor_listener.as_mut() {
                    if body_a.is_sensor {
                        listener.on_trigger(body_a, body_b);
                    }
                    if body_b.is_sensor {
                        listener.on_trigger(body_b, body_a);
                    }
                }
                continue;
            }

            if self.solver.resolve(body_a, body_b, &contact) == PairResponse::Skipped {
                continue;
            }
            if let Some(listener) = self.collision_listener.as_mut() {
                listener.on_bodies_collide(body_a, body_b, contact.normal);
            }
        }
    }

    /// World boundary first, then terrain tiles, body by body in arena order.
    fn resolve_terrain(&mut self) {
        let listener = &mut self.collision_listener;
        let bounds = self.bounds;
        let static_rects = &self.static_rects;

        for body in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            if let Some(bounds) = bounds.as_ref() {
                TerrainResolver::resolve_bounds(body, bounds, |body, edge| {
                    if let Some(listener) = listener.as_mut() {
                        listener.on_bounds_collide(body, edge);
                    }
                });
            }
            TerrainResolver::resolve_static_rects(body, static_rects, |body, tile, normal| {
                if let Some(listener) = listener.as_mut() {
                    listener.on_static_collide(body, tile, normal);
                }
            });
        }
    }

    /// Nearest body hit by the segment from `(x1, y1)` to `(x2, y2)`.
    pub fn raycast(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Option<RaycastHit> {
        self.raycast_query(&RaycastQuery::from_coords(x1, y1, x2, y2))
    }

    pub fn raycast_query(&self, query: &RaycastQuery) -> Option<RaycastHit> {
        Raycast::cast(query, &self.bodies)
    }

    pub fn raycast_with_filter<F>(&self, query: &RaycastQuery, filter: F) -> Option<RaycastHit>
    where
        F: FnMut(&RigidBody) -> bool,
    {
        Raycast::cast_with_filter(query, &self.bodies, filter)
    }

    /// Broad-phase candidate pairs for the current positions, without
    /// advancing the simulation.
    pub fn potential_pairs(&mut self) -> Vec<(BodyHandle, BodyHandle)> {
        self.broadphase.get_potential_pairs(&self.bodies)
    }
}
