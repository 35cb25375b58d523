use std::time::{Duration, Instant};

/// Counters and phase timings for the most recent `step` call.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepStats {
    pub substeps: u32,
    pub body_count: usize,
    pub candidate_pairs: usize,
    pub contacts: usize,
    pub sensor_triggers: usize,
    pub discarded_ms: f32,

    pub integrator_time: Duration,
    pub terrain_time: Duration,
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub total_time: Duration,
}

impl StepStats {
    pub fn report(&self) {
        let total_us = self.total_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::info!(
            "step: {} substeps, {} bodies, {} pairs, {} contacts, {} triggers, {:.2} ms discarded",
            self.substeps,
            self.body_count,
            self.candidate_pairs,
            self.contacts,
            self.sensor_triggers,
            self.discarded_ms
        );
        for (label, time) in [
            ("integrator", self.integrator_time),
            ("terrain", self.terrain_time),
            ("broad phase", self.broad_phase_time),
            ("narrow phase", self.narrow_phase_time),
        ] {
            log::info!(
                "  {:<12} {:.3} ms ({:.1}%)",
                label,
                time.as_secs_f32() * 1000.0,
                time.as_micros() as f32 / total_us * 100.0
            );
        }
    }
}

/// Adds the elapsed time to `output` when dropped.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
