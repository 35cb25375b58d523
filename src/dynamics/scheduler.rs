use crate::config::{DEFAULT_MAX_STEP_MS, DEFAULT_MAX_SUB_STEPS};

/// Substeps a single `step` call should run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    pub substeps: u32,
    /// Duration of every substep in milliseconds.
    pub substep_ms: f32,
    /// Accumulated time thrown away because the substep budget ran out.
    pub discarded_ms: f32,
}

impl StepPlan {
    fn idle() -> Self {
        Self {
            substeps: 0,
            substep_ms: 0.0,
            discarded_ms: 0.0,
        }
    }
}

/// Clamps frame deltas and, in fixed-step mode, turns them into a bounded
/// number of equal substeps using a carried accumulator.
#[derive(Debug, Clone)]
pub struct StepScheduler {
    max_step_ms: f32,
    fixed_step_ms: f32,
    max_sub_steps: u32,
    accumulator_ms: f32,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self {
            max_step_ms: DEFAULT_MAX_STEP_MS,
            fixed_step_ms: 0.0,
            max_sub_steps: DEFAULT_MAX_SUB_STEPS,
            accumulator_ms: 0.0,
        }
    }
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_step_ms(&self) -> f32 {
        self.max_step_ms
    }

    pub fn fixed_step_ms(&self) -> f32 {
        self.fixed_step_ms
    }

    pub fn max_sub_steps(&self) -> u32 {
        self.max_sub_steps
    }

    pub fn accumulator_ms(&self) -> f32 {
        self.accumulator_ms
    }

    pub fn is_fixed_step(&self) -> bool {
        self.fixed_step_ms > 0.0
    }

    /// `0` disables the clamp.
    pub fn set_max_step_ms(&mut self, ms: f32) {
        self.max_step_ms = if ms > 0.0 && ms.is_finite() { ms } else { 0.0 };
    }

    /// `step_ms <= 0` switches back to variable-step mode.
    pub fn set_fixed_step_ms(&mut self, step_ms: f32, max_sub_steps: u32) {
        self.fixed_step_ms = if step_ms > 0.0 && step_ms.is_finite() {
            step_ms
        } else {
            0.0
        };
        self.max_sub_steps = max_sub_steps.max(1);
        if !self.is_fixed_step() {
            self.accumulator_ms = 0.0;
        }
    }

    /// Clamps `delta_ms` into `[0, max_step_ms]`. Negative and NaN deltas
    /// count as zero.
    pub fn clamp_delta(&self, delta_ms: f32) -> f32 {
        let delta = if delta_ms > 0.0 { delta_ms } else { 0.0 };
        if self.max_step_ms > 0.0 {
            delta.min(self.max_step_ms)
        } else {
            delta
        }
    }

    /// Consumes a frame delta and returns the substeps to run.
    ///
    /// In fixed-step mode the accumulator never holds more than one fixed
    /// step once this returns.
    pub fn advance(&mut self, delta_ms: f32) -> StepPlan {
        let step_ms = self.clamp_delta(delta_ms);

        if !self.is_fixed_step() {
            if step_ms <= 0.0 {
                return StepPlan::idle();
            }
            return StepPlan {
                substeps: 1,
                substep_ms: step_ms,
                discarded_ms: 0.0,
            };
        }

        self.accumulator_ms += step_ms;
        let mut substeps = 0;
        while self.accumulator_ms >= self.fixed_step_ms && substeps < self.max_sub_steps {
            self.accumulator_ms -= self.fixed_step_ms;
            substeps += 1;
        }

        let mut discarded_ms = 0.0;
        if substeps == self.max_sub_steps && self.accumulator_ms > self.fixed_step_ms {
            discarded_ms = self.accumulator_ms - self.fixed_step_ms;
            self.accumulator_ms = self.fixed_step_ms;
            log::debug!(
                "substep budget of {} exhausted, discarding {:.2} ms of simulation time",
                self.max_sub_steps,
                discarded_ms
            );
        }

        StepPlan {
            substeps,
            substep_ms: self.fixed_step_ms,
            discarded_ms,
        }
    }
}
