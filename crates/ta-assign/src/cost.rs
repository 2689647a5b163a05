//! Link volume aggregation and cost refresh.
//!
//! These run single-threaded between flow-adjustment rounds and are the only
//! writers of link volumes, link travel times, and column costs.

use ta_column::ColumnPool;
use ta_core::PeriodId;
use ta_demand::Settings;
use ta_network::PhyNetwork;

/// Recompute every link's per-period volume as the sum over columns of
/// `column.volume × agent_type.pce`.
///
/// Only link volumes change; the name follows the usual column-generation
/// naming.  Column volumes are read, never written, and column costs are
/// refreshed separately by [`update_column_attributes`].
///
/// Every key's period and agent type must exist in `settings` and the
/// network must carry a volume slot for the period.
pub fn update_link_and_column_volume(
    network: &mut PhyNetwork,
    columns: &ColumnPool,
    settings: &Settings,
) {
    for link in &mut network.links {
        link.volumes.fill(0.0);
    }

    for (key, cv) in columns.iter() {
        let pce = settings.agent_type_by_id(key.agent_type).pce;
        let p = key.period.index();
        for col in cv.columns() {
            if col.volume <= 0.0 {
                continue;
            }
            let v = col.volume * pce;
            for &l in col.links() {
                network.links[l.index()].volumes[p] += v;
            }
        }
    }
}

/// Recompute each link's travel time in every period from its volume.
pub fn update_link_travel_time(network: &mut PhyNetwork) {
    let periods = network.period_count();
    for link in &mut network.links {
        for p in 0..periods {
            link.update_travel_time(PeriodId(p as u16));
        }
    }
}

/// Refresh each column's cached cost (Σ link travel time in the key's period)
/// and distance (Σ link length).
pub fn update_column_attributes(network: &PhyNetwork, columns: &mut ColumnPool) {
    for (key, cv) in columns.iter_mut() {
        for col in cv.columns_mut() {
            let (tt, dist) = col.links().iter().fold((0.0, 0.0), |(tt, dist), &l| {
                let link = network.link(l);
                (tt + link.travel_time(key.period), dist + link.length)
            });
            col.travel_time = tt;
            col.distance = dist;
        }
    }
}

/// Volumes, then travel times, then column costs.
pub(crate) fn refresh(network: &mut PhyNetwork, columns: &mut ColumnPool, settings: &Settings) {
    update_link_and_column_volume(network, columns, settings);
    update_link_travel_time(network);
    update_column_attributes(network, columns);
}
