//! The `Assignment` struct and its outer/inner iteration loop.

use std::time::Instant;

use log::{debug, info, warn};
use rayon::ThreadPool;
use rayon::prelude::*;

use ta_column::ColumnPool;
use ta_core::{AssignConfig, PeriodId, VolumeUpdate};
use ta_demand::Settings;
use ta_network::PhyNetwork;

use crate::cost::refresh;
use crate::gradient::update_column_gradient_and_flow;
use crate::spnetwork::{ShortestPath, SpNetwork, delete_spnetworks, setup_spnetworks};
use crate::{
    AssignObserver, AssignResult, IterationStats, LinkPerformance, update_link_travel_time,
};

/// Outcome of [`Assignment::find_ue`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AssignSummary {
    /// Outer iterations actually run.
    pub iterations:        u16,
    pub relative_gap:      f64,
    pub total_travel_time: f64,
    pub column_count:      usize,
    /// Demand keys that never received a column (destination unreachable).
    pub unassigned_keys:   usize,
    /// `true` if the run stopped early on `gap_tolerance`.
    pub converged:         bool,
}

/// A configured assignment run.
///
/// Holds the network (whose link volumes and travel times it updates), the
/// settings, and the column store.  Create via
/// [`AssignmentBuilder`][crate::AssignmentBuilder].
pub struct Assignment {
    pub(crate) config:      AssignConfig,
    pub(crate) network:     PhyNetwork,
    pub(crate) settings:    Settings,
    pub(crate) columns:     ColumnPool,
    pub(crate) thread_pool: Option<ThreadPool>,
}

impl Assignment {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &AssignConfig {
        &self.config
    }

    pub fn network(&self) -> &PhyNetwork {
        &self.network
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn columns(&self) -> &ColumnPool {
        &self.columns
    }

    /// Give back the network, settings, and column store.
    pub fn into_parts(self) -> (PhyNetwork, Settings, ColumnPool) {
        (self.network, self.settings, self.columns)
    }

    /// Volume, travel time, speed, and V/C of every physical link in
    /// `period`, in `LinkId` order.
    pub fn link_performance(&self, period: PeriodId) -> Vec<LinkPerformance> {
        self.network
            .physical_links()
            .map(|id| LinkPerformance::of(id, self.network.link(id), period))
            .collect()
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Run the column-generation schedule and return the final statistics.
    ///
    /// Calling it again restarts from an all-or-nothing load on the current
    /// travel times, keeping existing columns.
    pub fn find_ue<O: AssignObserver>(&mut self, observer: &mut O) -> AssignResult<AssignSummary> {
        let started = Instant::now();

        update_link_travel_time(&mut self.network);
        let mut spns = setup_spnetworks(&self.network, &self.columns, &self.settings);
        debug!("set up {} shortest-path networks", spns.len());

        let mut summary = AssignSummary {
            iterations:        0,
            relative_gap:      f64::NAN,
            total_travel_time: 0.0,
            column_count:      0,
            unassigned_keys:   0,
            converged:         false,
        };

        let mut found = self.generate_columns(&mut spns);
        for outer in 0..self.config.column_gen_num {
            let iter_start = Instant::now();
            observer.on_outer_start(outer);

            self.merge_columns(found, outer == 0);
            if outer == 0 {
                summary.unassigned_keys = self.unassigned_keys();
                if summary.unassigned_keys > 0 {
                    warn!(
                        "{} demand key(s) have no path to their destination and stay unassigned",
                        summary.unassigned_keys,
                    );
                }
            }
            refresh(&mut self.network, &mut self.columns, &self.settings);

            for inner in 0..self.config.column_opt_num {
                update_column_gradient_and_flow(&mut self.columns, inner);
                if self.config.volume_update == VolumeUpdate::PerInnerIteration {
                    refresh(&mut self.network, &mut self.columns, &self.settings);
                }
            }
            if self.config.volume_update == VolumeUpdate::PerOuterIteration {
                refresh(&mut self.network, &mut self.columns, &self.settings);
            }

            // Travel times stay fixed until the next merge, so these paths
            // serve both this iteration's gap and the next iteration's columns.
            found = self.generate_columns(&mut spns);
            let stats = self.iteration_stats(outer, iter_start, &found);
            info!(
                "iteration {}: relative gap {:.4}%, total travel time {:.2}, {} columns",
                outer,
                stats.relative_gap * 100.0,
                stats.total_travel_time,
                stats.column_count,
            );
            observer.on_outer_end(&stats);

            summary.iterations = outer + 1;
            summary.relative_gap = stats.relative_gap;
            summary.total_travel_time = stats.total_travel_time;
            summary.column_count = stats.column_count;

            if let Some(tol) = self.config.gap_tolerance {
                if stats.relative_gap < tol {
                    info!("relative gap below {tol} after {} iteration(s)", outer + 1);
                    summary.converged = true;
                    break;
                }
            }
        }

        delete_spnetworks(&mut spns);
        info!("assignment finished in {:.2?}", started.elapsed());
        observer.on_assignment_end(&summary);
        Ok(summary)
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Refresh every SpNetwork's costs and collect its shortest paths, one
    /// task per SpNetwork.  Buffers come back in SpNetwork order.
    fn generate_columns(&self, spns: &mut [SpNetwork]) -> Vec<Vec<ShortestPath>> {
        let t = Instant::now();
        let network = &self.network;
        let found = match &self.thread_pool {
            Some(pool) => pool.install(|| shortest_paths(spns, network)),
            None => shortest_paths(spns, network),
        };
        debug!("shortest paths: {:.2?}", t.elapsed());
        found
    }

    /// Insert the discovered paths into the column store.  On an
    /// all-or-nothing pass each key's demand moves entirely onto its path.
    fn merge_columns(&mut self, found: Vec<Vec<ShortestPath>>, all_or_nothing: bool) {
        let mut created = 0usize;
        for ShortestPath { key, links, .. } in found.into_iter().flatten() {
            let Some(cv) = self.columns.get_mut(&key) else {
                continue;
            };
            let od_volume = cv.od_volume();
            if all_or_nothing {
                for col in cv.columns_mut() {
                    col.volume = 0.0;
                }
            }
            let (col, is_new) = cv.get_or_insert(links);
            if all_or_nothing {
                col.volume = od_volume;
            }
            created += usize::from(is_new);
        }
        debug!("{created} new column(s)");
    }

    fn unassigned_keys(&self) -> usize {
        self.columns.iter().filter(|(_, cv)| cv.is_empty()).count()
    }

    /// Gap and total travel time of the current flows, with `found` holding
    /// the shortest paths under the current travel times.
    fn iteration_stats(
        &self,
        iteration: u16,
        started: Instant,
        found: &[Vec<ShortestPath>],
    ) -> IterationStats {
        let mut total_travel_time = 0.0;
        let mut column_count = 0;
        for (_, cv) in self.columns.iter() {
            column_count += cv.len();
            total_travel_time += cv
                .columns()
                .iter()
                .filter(|c| c.volume > 0.0)
                .map(|c| c.volume * c.travel_time)
                .sum::<f64>();
        }

        // Keys without a column carry no flow and are left out of both sums.
        let min_cost_total: f64 = found
            .iter()
            .flatten()
            .filter_map(|sp| {
                let cv = self.columns.get(&sp.key)?;
                (!cv.is_empty()).then(|| cv.od_volume() * sp.cost)
            })
            .sum();

        let relative_gap = if total_travel_time > 0.0 {
            ((total_travel_time - min_cost_total) / total_travel_time).max(0.0)
        } else {
            0.0
        };

        IterationStats {
            iteration,
            relative_gap,
            total_travel_time,
            column_count,
            elapsed: started.elapsed(),
        }
    }
}

fn shortest_paths(spns: &mut [SpNetwork], network: &PhyNetwork) -> Vec<Vec<ShortestPath>> {
    spns.par_iter_mut()
        .map(|spn| {
            spn.refresh_costs(network);
            spn.generate_columns(network)
        })
        .collect()
}
