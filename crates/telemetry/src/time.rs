// Path: crates/telemetry/src/time.rs
use std::time::{Duration, Instant};

/// Logs the elapsed time of a labelled scope at `debug` level when dropped.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Starts timing `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "hapi::timing",
            label = self.label,
            elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
            "scope finished"
        );
    }
}
