//! Assignment run configuration.

use crate::{TaError, TaResult};

/// When link volumes and travel times are recomputed from column flows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolumeUpdate {
    /// After every inner (flow-adjustment) iteration.  Column costs seen by
    /// the next inner iteration reflect the flow just shifted.
    #[default]
    PerInnerIteration,
    /// Once at the end of each outer iteration.
    PerOuterIteration,
}

/// Iteration schedule and resource settings for one assignment run.
///
/// Typically built by the application and handed to
/// `ta_assign::AssignmentBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignConfig {
    /// Outer iterations: each one rebuilds shortest-path trees and may add
    /// new columns.  Must be at least 1.
    pub column_gen_num: u16,

    /// Inner flow-adjustment iterations per outer iteration.
    pub column_opt_num: u16,

    /// Worker thread count for the shortest-path phase.  `None` uses Rayon's
    /// global pool (all logical cores).
    pub num_threads: Option<usize>,

    /// Opt-in early stop: finish after the first outer iteration whose
    /// relative gap falls below this value.  `None` runs the full schedule.
    pub gap_tolerance: Option<f64>,

    /// Link volume / travel time refresh granularity.
    pub volume_update: VolumeUpdate,
}

impl AssignConfig {
    /// Config with the given iteration schedule and all other settings at
    /// their defaults.
    pub fn new(column_gen_num: u16, column_opt_num: u16) -> Self {
        Self { column_gen_num, column_opt_num, ..Self::default() }
    }

    /// Reject schedules that cannot produce an assignment.
    pub fn validate(&self) -> TaResult<()> {
        if self.column_gen_num == 0 {
            return Err(TaError::Config(
                "column_gen_num must be at least 1 (no columns would be generated)".into(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(TaError::Config("num_threads must be positive".into()));
        }
        if let Some(gap) = self.gap_tolerance {
            if gap.is_nan() || gap < 0.0 {
                return Err(TaError::Config(format!("invalid gap tolerance {gap}")));
            }
        }
        Ok(())
    }
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            column_gen_num: 10,
            column_opt_num: 20,
            num_threads:    None,
            gap_tolerance:  None,
            volume_update:  VolumeUpdate::default(),
        }
    }
}
