//! Composite demand key.

use std::fmt;

use ta_core::{AgentTypeId, PeriodId, ZoneId};

/// Identifies one demand segment.
///
/// Field order defines the total order used by [`ColumnPool`][crate::ColumnPool]
/// iteration: origin, then destination, then period, then agent type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ColumnVecKey {
    pub origin:      ZoneId,
    pub destination: ZoneId,
    pub period:      PeriodId,
    pub agent_type:  AgentTypeId,
}

impl ColumnVecKey {
    #[inline]
    pub fn new(origin: ZoneId, destination: ZoneId, period: PeriodId, agent_type: AgentTypeId) -> Self {
        Self { origin, destination, period, agent_type }
    }
}

impl fmt::Display for ColumnVecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}→{} @{} [{}]",
            self.origin.0, self.destination.0, self.period.0, self.agent_type.0
        )
    }
}
