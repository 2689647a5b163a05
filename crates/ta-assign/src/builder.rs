//! Fluent builder for constructing an [`Assignment`].

use log::debug;
use rayon::ThreadPoolBuilder;

use ta_column::ColumnPool;
use ta_core::{AssignConfig, VolumeUpdate};
use ta_demand::Settings;
use ta_network::PhyNetwork;

use crate::{AssignError, AssignResult, Assignment};

/// Fluent builder for [`Assignment`].
///
/// # Required inputs
///
/// - [`AssignConfig`]: iteration schedule, threads, optional gap stop
/// - [`PhyNetwork`]: with one VDF/volume slot per demand period
/// - [`Settings`]: agent types and demand periods
/// - [`ColumnPool`]: holding the demand volumes (see `ta_demand::load_demands`)
///
/// # Optional overrides
///
/// | Method               | Default                        |
/// |----------------------|--------------------------------|
/// | `.num_threads(n)`    | `config.num_threads`           |
/// | `.gap_tolerance(g)`  | `config.gap_tolerance`         |
/// | `.volume_update(m)`  | `config.volume_update`         |
///
/// # Example
///
/// ```rust,ignore
/// let mut assignment = AssignmentBuilder::new(config, network, settings, columns)
///     .num_threads(4)
///     .build()?;
/// assignment.find_ue(&mut NoopObserver)?;
/// ```
pub struct AssignmentBuilder {
    config:   AssignConfig,
    network:  PhyNetwork,
    settings: Settings,
    columns:  ColumnPool,
}

impl AssignmentBuilder {
    pub fn new(
        config:   AssignConfig,
        network:  PhyNetwork,
        settings: Settings,
        columns:  ColumnPool,
    ) -> Self {
        Self { config, network, settings, columns }
    }

    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    pub fn gap_tolerance(mut self, gap: f64) -> Self {
        self.config.gap_tolerance = Some(gap);
        self
    }

    pub fn volume_update(mut self, mode: VolumeUpdate) -> Self {
        self.config.volume_update = mode;
        self
    }

    /// Validate inputs, build connectors and the worker pool, and return a
    /// ready-to-run [`Assignment`].
    pub fn build(mut self) -> AssignResult<Assignment> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        self.settings.validate()?;

        if self.network.period_count() < self.settings.period_count() {
            return Err(AssignError::PeriodMismatch {
                network:  self.network.period_count(),
                settings: self.settings.period_count(),
            });
        }

        for key in self.columns.keys() {
            let what = if key.period.index() >= self.settings.period_count() {
                "demand period"
            } else if key.agent_type.index() >= self.settings.agent_type_count() {
                "agent type"
            } else if key.origin.index() >= self.network.zone_count()
                || key.destination.index() >= self.network.zone_count()
            {
                "zone"
            } else {
                continue;
            };
            return Err(AssignError::UndefinedKey { key: key.to_string(), what });
        }

        // ── Connectors and worker pool ────────────────────────────────────
        let connectors = self.network.build_connectors();
        debug!("built {connectors} connector links");

        let thread_pool = match self.config.num_threads {
            Some(n) => Some(ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };

        Ok(Assignment {
            config:   self.config,
            network:  self.network,
            settings: self.settings,
            columns:  self.columns,
            thread_pool,
        })
    }
}
