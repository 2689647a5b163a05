//! Shortest-path computation contexts, one per (demand period, agent type).

use ta_column::{ColumnPool, ColumnVecKey};
use ta_core::{AgentTypeId, LinkId, PeriodId, ZoneId};
use ta_demand::{AgentType, Settings};
use ta_network::{PhyNetwork, ShortestPathTree};

/// One key's current shortest path over physical links, with its cost under
/// the cost view it was found on.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    pub key:   ColumnVecKey,
    pub links: Vec<LinkId>,
    pub cost:  f64,
}

/// A shortest-path context bound to one (demand period, agent type) pair.
///
/// Owns its cost view and tree buffers so that each instance can run on its
/// own worker with only a shared `&PhyNetwork`.
#[derive(Clone, Debug)]
pub struct SpNetwork {
    period:     PeriodId,
    agent_type: AgentTypeId,
    /// Per link: may the bound agent type use it?  Fixed at construction.
    usable:     Vec<bool>,
    /// Per link: current cost, `INFINITY` where unusable.
    link_cost:  Vec<f64>,
    /// Origin zones with positive demand, each with its destinations.
    origins:    Vec<(ZoneId, Vec<ZoneId>)>,
    tree:       ShortestPathTree,
}

impl SpNetwork {
    /// Bind to (`period`, `agent_type`) and collect the origins and
    /// destinations of that pair's demand keys in `columns`.
    pub fn new(
        network: &PhyNetwork,
        columns: &ColumnPool,
        period: PeriodId,
        agent_type: &AgentType,
    ) -> Self {
        let usable: Vec<bool> = network.links.iter().map(|l| l.allows(&agent_type.name)).collect();

        // Pool keys iterate by origin then destination, so a filtered scan
        // yields grouped, sorted destination lists.
        let mut origins: Vec<(ZoneId, Vec<ZoneId>)> = Vec::new();
        for key in columns
            .keys()
            .filter(|k| k.period == period && k.agent_type == agent_type.id)
        {
            match origins.last_mut() {
                Some((o, dests)) if *o == key.origin => dests.push(key.destination),
                _ => origins.push((key.origin, vec![key.destination])),
            }
        }

        Self {
            period,
            agent_type: agent_type.id,
            link_cost: vec![f64::INFINITY; usable.len()],
            usable,
            origins,
            tree: ShortestPathTree::new(network.node_count()),
        }
    }

    pub fn period(&self) -> PeriodId {
        self.period
    }

    pub fn agent_type(&self) -> AgentTypeId {
        self.agent_type
    }

    pub fn origin_count(&self) -> usize {
        self.origins.len()
    }

    /// Current cost view, indexed by `LinkId`.
    pub fn link_costs(&self) -> &[f64] {
        &self.link_cost
    }

    /// Copy current link travel times of the bound period into the cost view.
    pub fn refresh_costs(&mut self, network: &PhyNetwork) {
        for ((cost, &usable), link) in self.link_cost.iter_mut().zip(&self.usable).zip(&network.links) {
            *cost = if usable { link.travel_time(self.period) } else { f64::INFINITY };
        }
    }

    /// Build one tree per origin and return the physical-link shortest path
    /// of every reachable (origin, destination) key, in key order.
    ///
    /// Unreachable destinations produce no entry.
    pub fn generate_columns(&mut self, network: &PhyNetwork) -> Vec<ShortestPath> {
        let mut found = Vec::new();
        for (origin, dests) in &self.origins {
            let Some(source) = network.zone(*origin).centroid else {
                continue;
            };
            self.tree.build(network, source, &self.link_cost);

            for &dest in dests {
                let Some(sink) = network.zone(dest).centroid else {
                    continue;
                };
                let (Some(cost), Some(path)) =
                    (self.tree.cost_to(sink), self.tree.path_to(network, sink))
                else {
                    continue;
                };
                let links: Vec<LinkId> =
                    path.into_iter().filter(|&l| !network.link(l).is_connector).collect();
                if links.is_empty() {
                    continue;
                }
                let key = ColumnVecKey::new(*origin, dest, self.period, self.agent_type);
                found.push(ShortestPath { key, links, cost });
            }
        }
        found
    }
}

/// One [`SpNetwork`] per (demand period, agent type) pair, period-major.
///
/// Connectors must already be built.
pub fn setup_spnetworks(
    network: &PhyNetwork,
    columns: &ColumnPool,
    settings: &Settings,
) -> Vec<SpNetwork> {
    let mut spns = Vec::with_capacity(settings.period_count() * settings.agent_type_count());
    for dp in settings.demand_periods() {
        for at in settings.agent_types() {
            spns.push(SpNetwork::new(network, columns, dp.id, at));
        }
    }
    spns
}

/// Drop all SpNetworks and release their buffers.
pub fn delete_spnetworks(spns: &mut Vec<SpNetwork>) {
    spns.clear();
    spns.shrink_to_fit();
}
