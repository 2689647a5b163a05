//! `ta-core`: foundational types for the `rust_ta` assignment workspace.
//!
//! This crate is a dependency of every other `ta-*` crate.  It has no `ta-*`
//! dependencies and a single mandatory external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `LinkId`, `ZoneId`, `AgentTypeId`, `PeriodId`  |
//! | [`config`] | `AssignConfig`, `VolumeUpdate`                           |
//! | [`parse`]  | Parse-with-default helpers used by the CSV loaders       |
//! | [`error`]  | `TaError`, `TaResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `AssignConfig`.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod parse;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AssignConfig, VolumeUpdate};
pub use error::{TaError, TaResult};
pub use ids::{AgentTypeId, LinkId, NodeId, PeriodId, ZoneId};
pub use parse::{parse_flag, parse_or, parse_required, text_or};
