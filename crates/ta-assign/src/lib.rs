//! `ta-assign`: path-based user-equilibrium assignment.
//!
//! # Outer / inner loop
//!
//! ```text
//! build connectors; link travel times ← free-flow
//! ① Generate   : per (period, agent type) SpNetwork, in parallel:
//!                 refresh cost view, one shortest-path tree per origin,
//!                 emit (key, path, cost) into a task-local buffer.
//! for outer in 0..column_gen_num:
//!   ② Merge    : single-threaded, in SpNetwork order: insert/locate the
//!                 column of each pair; outer 0 puts each key's whole
//!                 demand on it (all-or-nothing).
//!   ③ Aggregate: link volumes ← Σ column volume × pce; travel times;
//!                 column costs.
//!   ④ Adjust   : column_opt_num gradient-projection rounds, each followed
//!                 by ③ (or ③ once at the end with PerOuterIteration).
//!   ① Generate : again, on the adjusted travel times.  The paths feed
//!                 the next merge; their costs give the gap.
//!   ⑤ Report   : relative gap, total travel time → log + observer;
//!                 optional early stop on gap_tolerance.
//! ```
//!
//! # Relative gap
//!
//! ```text
//! gap = (Σ column volume × column cost − Σ od volume × shortest-path cost)
//!       / Σ column volume × column cost
//! ```
//!
//! Shortest-path costs come from trees built on the travel times the
//! iteration ends with, so a cheaper path the store has not seen yet
//! still counts against convergence.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut columns = ColumnPool::new();
//! ta_demand::load_demands(dir, &settings, &network, &mut columns)?;
//! let mut assignment = AssignmentBuilder::new(config, network, settings, columns).build()?;
//! let summary = assignment.find_ue(&mut NoopObserver)?;
//! ```

pub mod assignment;
pub mod builder;
pub mod cost;
pub mod error;
pub mod gradient;
pub mod observer;
pub mod performance;
pub mod spnetwork;


pub use assignment::{AssignSummary, Assignment};
pub use builder::AssignmentBuilder;
pub use cost::{update_column_attributes, update_link_and_column_volume, update_link_travel_time};
pub use error::{AssignError, AssignResult};
pub use gradient::update_column_gradient_and_flow;
pub use observer::{AssignObserver, IterationStats, NoopObserver};
pub use performance::LinkPerformance;
pub use spnetwork::{ShortestPath, SpNetwork, delete_spnetworks, setup_spnetworks};
