//! OD demand ingestion.
//!
//! # CSV format
//!
//! One file per (demand period, agent type), as registered in
//! [`Settings`]:
//!
//! ```csv
//! o_zone_id,d_zone_id,volume
//! 1,2,350.5
//! 2,1,120
//! ```
//!
//! Rows naming an unknown zone or carrying a missing, unparsable, or
//! non-positive volume are skipped.  Intra-zonal rows and rows touching the
//! `"-1"` sentinel zone are not assignable either; they are counted apart,
//! with their volume, so the demand left out stays visible.  Repeated pairs
//! add up.

use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use ta_column::{ColumnPool, ColumnVecKey};
use ta_core::{AgentTypeId, PeriodId};
use ta_network::PhyNetwork;

use crate::{DemandResult, Settings};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DemandRecord {
    #[serde(default)]
    o_zone_id: Option<String>,
    #[serde(default)]
    d_zone_id: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    volume:    Option<f64>,
}

/// Counts reported by the loaders.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DemandSummary {
    /// Rows whose volume was recorded.
    pub accepted:       usize,
    /// Malformed rows, unknown zones, non-positive volumes.
    pub skipped:        usize,
    /// Rows whose origin and destination are the same zone.
    pub intra_zonal:    usize,
    /// Rows whose origin or destination is the `"-1"` sentinel zone.
    pub sentinel:       usize,
    /// Σ volume of the `intra_zonal` and `sentinel` rows.
    pub dropped_volume: f64,
    /// Σ ceil(volume) over accepted rows.
    pub agents:         u64,
}

impl DemandSummary {
    fn merge(&mut self, other: DemandSummary) {
        self.accepted += other.accepted;
        self.skipped += other.skipped;
        self.intra_zonal += other.intra_zonal;
        self.sentinel += other.sentinel;
        self.dropped_volume += other.dropped_volume;
        self.agents += other.agents;
    }

    fn reject(&mut self, why: DemandRejection, volume: f64) {
        match why {
            DemandRejection::UnknownZone | DemandRejection::NonPositiveVolume => {
                self.skipped += 1;
            }
            DemandRejection::SentinelZone => {
                self.sentinel += 1;
                self.dropped_volume += volume;
            }
            DemandRejection::IntraZonal => {
                self.intra_zonal += 1;
                self.dropped_volume += volume;
            }
        }
    }
}

/// Why [`try_add_demand`] recorded nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DemandRejection {
    UnknownZone,
    NonPositiveVolume,
    SentinelZone,
    IntraZonal,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Record `volume` for one OD pair and return its key.
///
/// Checks run in order: both zones known, `volume` positive, neither zone
/// the `"-1"` sentinel, origin distinct from destination.
pub fn try_add_demand(
    network: &PhyNetwork,
    pool: &mut ColumnPool,
    origin: &str,
    destination: &str,
    period: PeriodId,
    agent_type: AgentTypeId,
    volume: f64,
) -> Result<ColumnVecKey, DemandRejection> {
    let (Some(o), Some(d)) = (network.zone_id(origin), network.zone_id(destination)) else {
        return Err(DemandRejection::UnknownZone);
    };
    if volume.is_nan() || volume <= 0.0 {
        return Err(DemandRejection::NonPositiveVolume);
    }
    if network.zone(o).is_sentinel() || network.zone(d).is_sentinel() {
        return Err(DemandRejection::SentinelZone);
    }
    if o == d {
        return Err(DemandRejection::IntraZonal);
    }
    let key = ColumnVecKey::new(o, d, period, agent_type);
    if pool.update(key, volume) {
        Ok(key)
    } else {
        Err(DemandRejection::NonPositiveVolume)
    }
}

/// [`try_add_demand`] without the reason: `true` if `volume` was recorded.
pub fn add_demand(
    network: &PhyNetwork,
    pool: &mut ColumnPool,
    origin: &str,
    destination: &str,
    period: PeriodId,
    agent_type: AgentTypeId,
    volume: f64,
) -> bool {
    try_add_demand(network, pool, origin, destination, period, agent_type, volume).is_ok()
}

/// Read one demand file's rows into `pool` under (`period`, `agent_type`).
///
/// Accepts any `Read` source; tests pass a `std::io::Cursor`.
pub fn load_demand_reader<R: Read>(
    reader: R,
    network: &PhyNetwork,
    pool: &mut ColumnPool,
    period: PeriodId,
    agent_type: AgentTypeId,
) -> DemandResult<DemandSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut summary = DemandSummary::default();
    for result in csv_reader.deserialize::<DemandRecord>() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => {
                summary.skipped += 1;
                continue;
            }
        };

        let (Some(o), Some(d), Some(volume)) = (row.o_zone_id, row.d_zone_id, row.volume) else {
            summary.skipped += 1;
            continue;
        };

        match try_add_demand(network, pool, &o, &d, period, agent_type, volume) {
            Ok(_) => {
                summary.accepted += 1;
                summary.agents += volume.ceil() as u64;
            }
            Err(why) => summary.reject(why, volume),
        }
    }

    debug!(
        "demand records for period {} / agent type {}: {} accepted, {} skipped, \
         {} intra-zonal, {} on the sentinel zone",
        period.0, agent_type.0, summary.accepted, summary.skipped, summary.intra_zonal,
        summary.sentinel,
    );
    Ok(summary)
}

/// Read every demand file registered in `settings`, resolving file names
/// against `dir`.
pub fn load_demands(
    dir: &Path,
    settings: &Settings,
    network: &PhyNetwork,
    pool: &mut ColumnPool,
) -> DemandResult<DemandSummary> {
    let mut total = DemandSummary::default();
    for dp in settings.demand_periods() {
        for demand in &dp.demands {
            let file = std::fs::File::open(dir.join(&demand.file_name))?;
            let summary = load_demand_reader(file, network, pool, dp.id, demand.agent_type)?;
            total.merge(summary);
        }
    }
    info!("the number of agents is {}", total.agents);
    if total.intra_zonal + total.sentinel > 0 {
        warn!(
            "{} intra-zonal and {} sentinel-zone record(s) left out, volume {:.2}",
            total.intra_zonal, total.sentinel, total.dropped_volume,
        );
    }
    Ok(total)
}
