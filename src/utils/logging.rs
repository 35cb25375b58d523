use log::{log_enabled, Level};
use std::time::Instant;

/// Scoped timer that traces how long a simulation phase took.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!("end {} ({} µs)", self.label, self.start.elapsed().as_micros());
        }
    }
}

/// Logs a coerced configuration value.
pub fn warn_coerced<T: std::fmt::Debug>(setting: &str, requested: T, applied: T) {
    log::warn!("{setting}: invalid value {requested:?}, using {applied:?}");
}
