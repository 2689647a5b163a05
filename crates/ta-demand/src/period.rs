//! Demand periods and their per-class demand sources.

use ta_core::{AgentTypeId, PeriodId};

/// Name of the demand period created by [`Settings::auto`](crate::Settings::auto).
pub const DEFAULT_PERIOD: &str = "AM";

/// Demand file read by [`Settings::auto`](crate::Settings::auto).
pub const DEFAULT_DEMAND_FILE: &str = "demand.csv";

/// One demand source: the file holding OD volumes of one agent type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Demand {
    pub file_name:  String,
    pub agent_type: AgentTypeId,
}

/// A time period with one [`Demand`] per agent type that travels in it.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandPeriod {
    pub id:          PeriodId,
    pub name:        String,
    /// Free-form time window label, e.g. `"0700_0800"`.
    pub time_period: String,
    pub demands:     Vec<Demand>,
}

impl DemandPeriod {
    pub fn new(id: PeriodId, name: impl Into<String>) -> Self {
        Self {
            id,
            name:        name.into(),
            time_period: String::new(),
            demands:     Vec::new(),
        }
    }
}
