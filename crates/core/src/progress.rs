//! Progress reporting for long-running sweeps
//!
//! Filters take a `&mut dyn ProgressListener` and call it synchronously
//! while they run. Listeners only observe; they cannot stop a sweep.

/// A single progress notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Name of the strel or stage emitting the event
    pub label: &'static str,
    /// Number of units completed (lines, planes or steps)
    pub current: usize,
    /// Total number of units
    pub total: usize,
}

impl ProgressEvent {
    pub fn new(label: &'static str, current: usize, total: usize) -> Self {
        Self {
            label,
            current,
            total,
        }
    }

    /// Completed fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Receiver of progress notifications
pub trait ProgressListener {
    fn on_progress(&mut self, event: &ProgressEvent);
}

impl<F> ProgressListener for F
where
    F: FnMut(&ProgressEvent),
{
    fn on_progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressListener for Silent {
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}
