//! The settings aggregate: agent types and demand periods.

use ta_core::{AgentTypeId, PeriodId, TaError, TaResult};

use crate::agent::{AgentType, DEFAULT_AGENT_TYPE};
use crate::period::{DEFAULT_DEMAND_FILE, DEFAULT_PERIOD, Demand, DemandPeriod};

/// Agent types and demand periods of one run.
///
/// Ids are assigned sequentially in insertion order, so `AgentTypeId(i)` is
/// always `agent_types()[i]`.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    agent_types:    Vec<AgentType>,
    demand_periods: Vec<DemandPeriod>,
}

impl Settings {
    /// Empty settings.  Fails [`validate`](Self::validate) until at least one
    /// agent type and one demand period are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// One agent type (`"auto"`, PCE 1) and one demand period (`"AM"`) that
    /// reads `demand.csv`.
    pub fn auto() -> Self {
        let mut s = Self::new();
        let at = s.add_agent_type(AgentType::new(AgentTypeId(0), DEFAULT_AGENT_TYPE));
        let dp = s.add_demand_period(DemandPeriod::new(PeriodId(0), DEFAULT_PERIOD));
        s.demand_periods[dp.index()].demands.push(Demand {
            file_name:  DEFAULT_DEMAND_FILE.to_owned(),
            agent_type: at,
        });
        s
    }

    /// Append an agent type.  Its `id` is overwritten with the next
    /// sequential id, which is returned.
    pub fn add_agent_type(&mut self, mut agent_type: AgentType) -> AgentTypeId {
        let id = AgentTypeId(self.agent_types.len() as u16);
        agent_type.id = id;
        self.agent_types.push(agent_type);
        id
    }

    /// Append a demand period.  Its `id` is overwritten with the next
    /// sequential id, which is returned.
    pub fn add_demand_period(&mut self, mut period: DemandPeriod) -> PeriodId {
        let id = PeriodId(self.demand_periods.len() as u16);
        period.id = id;
        self.demand_periods.push(period);
        id
    }

    /// Register `file_name` as the demand of `agent_type` in `period`.
    pub fn add_demand(
        &mut self,
        period: PeriodId,
        agent_type: AgentTypeId,
        file_name: impl Into<String>,
    ) -> TaResult<()> {
        if agent_type.index() >= self.agent_types.len() {
            return Err(TaError::NotFound { what: "agent type", name: agent_type.to_string() });
        }
        let dp = self
            .demand_periods
            .get_mut(period.index())
            .ok_or_else(|| TaError::NotFound { what: "demand period", name: period.to_string() })?;
        dp.demands.push(Demand { file_name: file_name.into(), agent_type });
        Ok(())
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn agent_types(&self) -> &[AgentType] {
        &self.agent_types
    }

    pub fn demand_periods(&self) -> &[DemandPeriod] {
        &self.demand_periods
    }

    pub fn agent_type_count(&self) -> usize {
        self.agent_types.len()
    }

    pub fn period_count(&self) -> usize {
        self.demand_periods.len()
    }

    /// Agent type by name, or `None` if no such class exists.
    pub fn agent_type(&self, name: &str) -> Option<&AgentType> {
        self.agent_types.iter().find(|at| at.name == name)
    }

    /// Id of the agent type called `name`.
    pub fn agent_type_id(&self, name: &str) -> TaResult<AgentTypeId> {
        self.agent_type(name)
            .map(|at| at.id)
            .ok_or_else(|| TaError::NotFound { what: "agent type", name: name.to_owned() })
    }

    pub fn contains_agent_type(&self, name: &str) -> bool {
        self.agent_type(name).is_some()
    }

    #[inline]
    pub fn agent_type_by_id(&self, id: AgentTypeId) -> &AgentType {
        &self.agent_types[id.index()]
    }

    #[inline]
    pub fn demand_period(&self, id: PeriodId) -> &DemandPeriod {
        &self.demand_periods[id.index()]
    }

    /// Reject settings an assignment cannot run with.
    pub fn validate(&self) -> TaResult<()> {
        if self.agent_types.is_empty() {
            return Err(TaError::Config("no agent types defined".into()));
        }
        if self.demand_periods.is_empty() {
            return Err(TaError::Config("no demand periods defined".into()));
        }
        if let Some(at) = self.agent_types.iter().find(|at| at.pce.is_nan() || at.pce < 0.0) {
            return Err(TaError::Config(format!(
                "agent type {:?} has invalid pce {}",
                at.name, at.pce
            )));
        }
        Ok(())
    }
}
