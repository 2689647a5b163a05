//! corridor: runnable demo of the rust_ta assignment workspace.
//!
//! ```text
//! corridor                      # built-in two-corridor network → ./output
//! corridor DATA_DIR [OUT_DIR]   # node.csv, link.csv, demand.csv from DATA_DIR
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to follow the iterations.

mod network;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use ta_assign::AssignmentBuilder;
use ta_column::ColumnPool;
use ta_core::{AssignConfig, PeriodId};
use ta_demand::{Settings, load_demand_reader, load_demands};
use ta_network::{PhyNetwork, load_network_dir};
use ta_output::{CsvWriter, IterationLogObserver};

use network::{DEMAND_CSV, build_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const COLUMN_GEN_NUM: u16 = 20;
const COLUMN_OPT_NUM: u16 = 20;
const OUTPUT_PARTS:   usize = 8;

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_inputs(data_dir: Option<&Path>, settings: &Settings) -> Result<(PhyNetwork, ColumnPool)> {
    let mut columns = ColumnPool::new();

    let network = match data_dir {
        Some(dir) => {
            let network = load_network_dir(dir, settings.period_count())
                .with_context(|| format!("loading network from {}", dir.display()))?;
            load_demands(dir, settings, &network, &mut columns)
                .with_context(|| format!("loading demand from {}", dir.display()))?;
            network
        }
        None => {
            let network = build_network();
            let at = settings.agent_type_id("auto")?;
            let summary =
                load_demand_reader(Cursor::new(DEMAND_CSV), &network, &mut columns, PeriodId(0), at)?;
            info!("the number of agents is {}", summary.agents);
            network
        }
    };
    Ok((network, columns))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_dir: Option<PathBuf> = args.next().map(PathBuf::from);
    let out_dir: PathBuf = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);

    // 1. Settings and inputs.
    let settings = Settings::auto();
    let (network, columns) = load_inputs(data_dir.as_deref(), &settings)?;
    println!(
        "Network: {} nodes, {} links, {} zones  |  demand keys: {}",
        network.node_count(),
        network.link_count(),
        network.zone_count(),
        columns.len(),
    );

    // 2. Assignment.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut trace = IterationLogObserver::new(&out_dir)?;

    let config = AssignConfig::new(COLUMN_GEN_NUM, COLUMN_OPT_NUM);
    let mut assignment = AssignmentBuilder::new(config, network, settings, columns).build()?;

    let t0 = Instant::now();
    let summary = assignment.find_ue(&mut trace)?;
    if let Some(e) = trace.take_error() {
        eprintln!("iteration log error: {e}");
    }
    println!(
        "Assignment: {} iterations, relative gap {:.4}%, {} columns, {} unassigned keys ({:.2?})",
        summary.iterations,
        summary.relative_gap * 100.0,
        summary.column_count,
        summary.unassigned_keys,
        t0.elapsed(),
    );

    // 3. Output.
    let mut writer = CsvWriter::new(&out_dir)?;
    let paths = writer.write_columns_parallel(&assignment, OUTPUT_PARTS)?;
    let links = writer.write_link_performance(&assignment)?;
    writer.finish()?;
    println!("Wrote {paths} paths and {links} link rows to {}", out_dir.display());

    Ok(())
}
