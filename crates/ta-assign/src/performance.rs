//! Per-link assignment results.

use ta_core::{LinkId, PeriodId};
use ta_network::Link;

/// Assigned state of one link in one demand period.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkPerformance {
    pub link:        LinkId,
    pub volume:      f64,
    /// Minutes.
    pub travel_time: f64,
    /// Length units per hour; the free-flow speed when travel time is zero.
    pub speed:       f64,
    /// Volume over the period's effective capacity.
    pub voc:         f64,
}

impl LinkPerformance {
    pub(crate) fn of(id: LinkId, link: &Link, period: PeriodId) -> Self {
        let volume = link.volume(period);
        let travel_time = link.travel_time(period);
        let speed = if travel_time > 0.0 && travel_time.is_finite() {
            link.length / travel_time * 60.0
        } else if travel_time > 0.0 {
            0.0
        } else {
            link.free_speed
        };
        let capacity = link
            .vdf(period)
            .map_or_else(|| link.total_capacity(), |v| v.effective_capacity());
        let voc = if capacity > 0.0 {
            volume / capacity
        } else if volume > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Self { link: id, volume, travel_time, speed, voc }
    }
}
