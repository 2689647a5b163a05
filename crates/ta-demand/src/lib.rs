//! `ta-demand`: traveler classes, demand periods, and OD demand ingestion.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`agent`]    | `AgentType`: a traveler class with its PCE factor        |
//! | [`period`]   | `DemandPeriod`, `Demand`: period and per-class source    |
//! | [`settings`] | `Settings`: the agent-type / demand-period aggregate     |
//! | [`loader`]   | `try_add_demand`, `add_demand`, `load_demands`, `DemandSummary` |
//! | [`error`]    | `DemandError`, `DemandResult<T>`                          |
//!
//! Demand volumes land directly in a `ta_column::ColumnPool`, keyed by
//! (origin zone, destination zone, period, agent type).

pub mod agent;
pub mod error;
pub mod loader;
pub mod period;
pub mod settings;


pub use agent::AgentType;
pub use error::{DemandError, DemandResult};
pub use loader::{
    DemandRejection, DemandSummary, add_demand, load_demand_reader, load_demands, try_add_demand,
};
pub use period::{Demand, DemandPeriod};
pub use settings::Settings;
