//! Plain data row types written by the CSV backend.

use ta_assign::{IterationStats, LinkPerformance};
use ta_column::{Column, ColumnVec, ColumnVecKey};
use ta_demand::Settings;
use ta_network::PhyNetwork;

/// One path with positive flow, as listed in `agents.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub o_zone_id:     String,
    pub d_zone_id:     String,
    /// Column position within its demand key.
    pub path_id:       usize,
    pub agent_type:    String,
    pub demand_period: String,
    pub volume:        f64,
    pub travel_time:   f64,
    pub distance:      f64,
    /// External node ids, `;`-separated.
    pub node_sequence: String,
    /// External link ids, `;`-separated.
    pub link_sequence: String,
    /// WKT `LINESTRING` through the node coordinates.
    pub geometry:      String,
}

impl ColumnRow {
    pub const HEADER: [&'static str; 12] = [
        "agent_id",
        "o_zone_id",
        "d_zone_id",
        "path_id",
        "agent_type",
        "demand_period",
        "volume",
        "travel_time",
        "distance",
        "node_sequence",
        "link_sequence",
        "geometry",
    ];

    pub fn new(
        network: &PhyNetwork,
        settings: &Settings,
        key: &ColumnVecKey,
        column: &Column,
    ) -> Self {
        let nodes = network.path_nodes(column.links());

        let node_sequence = nodes
            .iter()
            .map(|&n| network.node(n).id.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let link_sequence = column
            .links()
            .iter()
            .map(|&l| network.link(l).id.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let coords = nodes
            .iter()
            .map(|&n| {
                let node = network.node(n);
                format!("{} {}", node.x, node.y)
            })
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            o_zone_id:     network.zone(key.origin).id.clone(),
            d_zone_id:     network.zone(key.destination).id.clone(),
            path_id:       column.id(),
            agent_type:    settings.agent_type_by_id(key.agent_type).name.clone(),
            demand_period: settings.demand_period(key.period).name.clone(),
            volume:        column.volume,
            travel_time:   column.travel_time,
            distance:      column.distance,
            node_sequence,
            link_sequence,
            geometry:      format!("LINESTRING ({coords})"),
        }
    }

    pub fn record(&self, agent_id: usize) -> [String; 12] {
        [
            agent_id.to_string(),
            self.o_zone_id.clone(),
            self.d_zone_id.clone(),
            self.path_id.to_string(),
            self.agent_type.clone(),
            self.demand_period.clone(),
            self.volume.to_string(),
            self.travel_time.to_string(),
            self.distance.to_string(),
            self.node_sequence.clone(),
            self.link_sequence.clone(),
            self.geometry.clone(),
        ]
    }
}

/// Rows for every positive-flow column of `entries`, in order.
pub(crate) fn column_rows(
    network: &PhyNetwork,
    settings: &Settings,
    entries: &[(&ColumnVecKey, &ColumnVec)],
) -> Vec<ColumnRow> {
    entries
        .iter()
        .flat_map(|&(key, cv)| {
            cv.columns()
                .iter()
                .filter(|c| c.volume > 0.0)
                .map(move |c| ColumnRow::new(network, settings, key, c))
        })
        .collect()
}

/// One link in one demand period, as listed in `link_performance.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPerformanceRow {
    pub link_id:      String,
    pub from_node_id: String,
    pub to_node_id:   String,
    pub time_period:  String,
    pub volume:       f64,
    pub travel_time:  f64,
    pub speed:        f64,
    pub voc:          f64,
    pub geometry:     String,
}

impl LinkPerformanceRow {
    pub const HEADER: [&'static str; 9] = [
        "link_id",
        "from_node_id",
        "to_node_id",
        "time_period",
        "volume",
        "travel_time",
        "speed",
        "VOC",
        "geometry",
    ];

    pub fn new(network: &PhyNetwork, period_name: &str, perf: &LinkPerformance) -> Self {
        let link = network.link(perf.link);
        Self {
            link_id:      link.id.clone(),
            from_node_id: network.node(link.from_node).id.clone(),
            to_node_id:   network.node(link.to_node).id.clone(),
            time_period:  period_name.to_owned(),
            volume:       perf.volume,
            travel_time:  perf.travel_time,
            speed:        perf.speed,
            voc:          perf.voc,
            geometry:     link.geometry.clone(),
        }
    }

    pub fn record(&self) -> [String; 9] {
        [
            self.link_id.clone(),
            self.from_node_id.clone(),
            self.to_node_id.clone(),
            self.time_period.clone(),
            self.volume.to_string(),
            self.travel_time.to_string(),
            self.speed.to_string(),
            self.voc.to_string(),
            self.geometry.clone(),
        ]
    }
}

/// Convergence statistics of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRow {
    pub iteration:         u16,
    pub relative_gap:      f64,
    pub total_travel_time: f64,
    pub column_count:      usize,
    pub elapsed_secs:      f64,
}

impl IterationRow {
    pub const HEADER: [&'static str; 5] =
        ["iteration", "relative_gap", "total_travel_time", "column_count", "elapsed_secs"];

    pub fn record(&self) -> [String; 5] {
        [
            self.iteration.to_string(),
            self.relative_gap.to_string(),
            self.total_travel_time.to_string(),
            self.column_count.to_string(),
            self.elapsed_secs.to_string(),
        ]
    }
}

impl From<&IterationStats> for IterationRow {
    fn from(s: &IterationStats) -> Self {
        Self {
            iteration:         s.iteration,
            relative_gap:      s.relative_gap,
            total_travel_time: s.total_travel_time,
            column_count:      s.column_count,
            elapsed_secs:      s.elapsed.as_secs_f64(),
        }
    }
}
