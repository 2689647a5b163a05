//! GMNS-style CSV network loader.
//!
//! # `node.csv`
//!
//! ```csv
//! node_id,zone_id,x_coord,y_coord,is_boundary,bin_index
//! 1,1,0.0,0.0,1,0
//! 2,,1.0,0.0,,
//! ```
//!
//! # `link.csv`
//!
//! ```csv
//! link_id,from_node_id,to_node_id,length,lanes,free_speed,capacity,allowed_uses,VDF_alpha1,VDF_beta1
//! 1,1,2,0.5,2,60,1800,all,0.15,4
//! ```
//!
//! Per-period VDF columns are `VDF_alpha{p}`, `VDF_beta{p}`, `VDF_mu{p}`,
//! `VDF_fftt{p}`, `VDF_cap{p}`, `VDF_phf{p}` for `p = 1..=period_count`.
//!
//! # Best-effort policy
//!
//! Optional fields fall back to their defaults when absent, blank, or
//! malformed.  A record missing a required field (node id; link id, endpoint
//! ids, length) or naming an unknown node is skipped.  Only unreadable input
//! is an error.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use rustc_hash::FxHashMap;

use ta_core::{parse_flag, parse_or, parse_required, text_or};

use crate::network::{DEFAULT_ZONE_ID, LinkSpec, NetworkBuilder, NodeSpec, PhyNetwork};
use crate::vdf::VdfSpec;
use crate::NetworkResult;

// ── Header lookup ─────────────────────────────────────────────────────────────

/// Column-name → position map for one CSV file.
struct Header(FxHashMap<String, usize>);

impl Header {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_owned(), i))
                .collect(),
        )
    }

    /// The named field of `record`, or `None` if the column is absent.
    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.0.get(name).and_then(|&i| record.get(i))
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Pull the next well-formed record, skipping malformed rows but surfacing
/// I/O failures.
fn next_record<R: Read>(
    records: &mut csv::StringRecordsIter<'_, R>,
    skipped: &mut usize,
) -> NetworkResult<Option<StringRecord>> {
    for result in records.by_ref() {
        match result {
            Ok(record) => return Ok(Some(record)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => *skipped += 1,
        }
    }
    Ok(None)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `node.csv` and `link.csv` from `dir`.
pub fn load_network_dir(dir: &Path, period_count: usize) -> NetworkResult<PhyNetwork> {
    let mut builder = NetworkBuilder::new(period_count);

    let nodes = std::fs::File::open(dir.join("node.csv"))?;
    let node_count = load_nodes_reader(nodes, &mut builder)?;

    let links = std::fs::File::open(dir.join("link.csv"))?;
    let link_count = load_links_reader(links, &mut builder)?;

    let network = builder.build();
    info!(
        "loaded network from {}: {node_count} nodes, {link_count} links, {} zones",
        dir.display(),
        network.zone_count(),
    );
    Ok(network)
}

/// Read node records into `builder`.  Returns the number of nodes added.
pub fn load_nodes_reader<R: Read>(reader: R, builder: &mut NetworkBuilder) -> NetworkResult<usize> {
    let mut csv_reader = csv_reader(reader);
    let header = Header::new(csv_reader.headers()?);
    let mut records = csv_reader.records();

    let mut added = 0;
    let mut skipped = 0;
    while let Some(rec) = next_record(&mut records, &mut skipped)? {
        let Some(id) = parse_required::<String>(header.get(&rec, "node_id")) else {
            skipped += 1;
            continue;
        };

        let spec = NodeSpec {
            id,
            x:           parse_or(header.get(&rec, "x_coord"), 91.0),
            y:           parse_or(header.get(&rec, "y_coord"), 181.0),
            zone_id:     text_or(header.get(&rec, "zone_id"), DEFAULT_ZONE_ID),
            is_activity: parse_flag(header.get(&rec, "is_boundary")).unwrap_or(false),
            bin_index:   parse_or(header.get(&rec, "bin_index"), 0),
        };

        match builder.add_node(spec) {
            Some(_) => added += 1,
            None => skipped += 1,
        }
    }

    debug!("node records: {added} added, {skipped} skipped");
    Ok(added)
}

/// Read link records into `builder`.  Nodes must already be loaded.
/// Returns the number of links added.
pub fn load_links_reader<R: Read>(reader: R, builder: &mut NetworkBuilder) -> NetworkResult<usize> {
    let mut csv_reader = csv_reader(reader);
    let header = Header::new(csv_reader.headers()?);
    let mut records = csv_reader.records();
    let periods = builder.period_count();

    let mut added = 0;
    let mut skipped = 0;
    while let Some(rec) = next_record(&mut records, &mut skipped)? {
        let field = |name: &str| header.get(&rec, name);

        let (Some(id), Some(from), Some(to), Some(length)) = (
            parse_required::<String>(field("link_id")),
            parse_required::<String>(field("from_node_id")),
            parse_required::<String>(field("to_node_id")),
            parse_required::<f64>(field("length")),
        ) else {
            skipped += 1;
            continue;
        };

        let vdfs = (1..=periods)
            .map(|p| VdfSpec {
                alpha:    parse_required(field(&format!("VDF_alpha{p}"))),
                beta:     parse_required(field(&format!("VDF_beta{p}"))),
                mu:       parse_required(field(&format!("VDF_mu{p}"))),
                fftt:     parse_required(field(&format!("VDF_fftt{p}"))),
                capacity: parse_required(field(&format!("VDF_cap{p}"))),
                phf:      parse_required(field(&format!("VDF_phf{p}"))),
            })
            .collect();

        let spec = LinkSpec {
            id,
            from_node_id: from,
            to_node_id:   to,
            length,
            lanes:        parse_or(field("lanes"), 1),
            link_type:    parse_or(field("link_type"), 1),
            free_speed:   parse_or(field("free_speed"), 60.0),
            capacity:     parse_or(field("capacity"), 60.0),
            allowed_uses: text_or(field("allowed_uses"), "all"),
            geometry:     text_or(field("geometry"), ""),
            vdfs,
        };

        match builder.add_link(spec) {
            Some(_) => added += 1,
            None => skipped += 1,
        }
    }

    debug!("link records: {added} added, {skipped} skipped");
    Ok(added)
}
