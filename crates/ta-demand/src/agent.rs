//! Traveler classes.

use ta_core::AgentTypeId;

/// Name of the agent type created by [`Settings::auto`](crate::Settings::auto).
pub const DEFAULT_AGENT_TYPE: &str = "auto";

/// A traveler class.
///
/// Links list the classes allowed on them by `name`; everything else refers
/// to the class by `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentType {
    pub id:   AgentTypeId,
    pub name: String,
    /// Passenger-car equivalent: link volume contributed per unit of flow.
    pub pce:  f64,
}

impl AgentType {
    pub fn new(id: AgentTypeId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), pce: 1.0 }
    }

    pub fn with_pce(mut self, pce: f64) -> Self {
        self.pce = pce;
        self
    }
}
