//! Step observer trait for monitoring simulation progress.

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called once the pose, bounding-box and area passes are done.
    fn on_pre_pass(&mut self, _bodies: usize) {}

    /// Called after every particle has been integrated and resolved, before
    /// the new buffer is published. `corrections` counts particles that were
    /// snapped out of another body.
    fn on_integrate(&mut self, _corrections: usize) {}

    /// Called when the new buffer has been published.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards tick progress to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct LogStepObserver {
    tick: u64,
}

impl LogStepObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

impl StepObserver for LogStepObserver {
    fn on_pre_pass(&mut self, bodies: usize) {
        log::trace!("tick {}: pre-pass done for {} bodies", self.tick, bodies);
    }

    fn on_integrate(&mut self, corrections: usize) {
        if corrections > 0 {
            log::trace!("tick {}: {} collision corrections", self.tick, corrections);
        }
    }

    fn on_step_complete(&mut self) {
        self.tick += 1;
    }
}
