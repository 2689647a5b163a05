//! Assignment observer trait for progress reporting and convergence traces.

use std::time::Duration;

use crate::AssignSummary;

/// Statistics of one completed outer iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationStats {
    /// Zero-based outer iteration number.
    pub iteration:         u16,
    /// `(Σ vol·cost − Σ od_volume·min_cost) / Σ vol·cost` over all keys.
    pub relative_gap:      f64,
    /// Σ column volume × column cost, in vehicle-minutes.
    pub total_travel_time: f64,
    pub column_count:      usize,
    /// Wall time spent in this outer iteration.
    pub elapsed:           Duration,
}

/// Callbacks invoked by [`Assignment::find_ue`][crate::Assignment::find_ue].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: gap trace
///
/// ```rust,ignore
/// struct GapTrace(Vec<f64>);
///
/// impl AssignObserver for GapTrace {
///     fn on_outer_end(&mut self, stats: &IterationStats) {
///         self.0.push(stats.relative_gap);
///     }
/// }
/// ```
pub trait AssignObserver {
    /// Called before column generation of each outer iteration.
    fn on_outer_start(&mut self, _iteration: u16) {}

    /// Called after the inner loop of each outer iteration.
    fn on_outer_end(&mut self, _stats: &IterationStats) {}

    /// Called once when the run finishes.
    fn on_assignment_end(&mut self, _summary: &AssignSummary) {}
}

/// An [`AssignObserver`] that does nothing.
pub struct NoopObserver;

impl AssignObserver for NoopObserver {}
