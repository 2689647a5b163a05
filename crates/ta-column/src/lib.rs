//! `ta-column`: the path ("column") store.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`key`]    | `ColumnVecKey`: (origin, destination, period, agent type) |
//! | [`column`] | `Column`, `ColumnVec`: paths of one key, deduplicated     |
//! | [`pool`]   | `ColumnPool`: ordered map of keys to `ColumnVec`s         |
//!
//! # Access discipline
//!
//! The store has no interior mutability.  Mutation needs `&mut ColumnPool`
//! (one writer), while `&ColumnPool` is `Sync` and may be traversed from
//! many threads once assignment is idle.
//!
//! Flow conservation per key is the assignment driver's job; the store only
//! records target volumes and column flows.

pub mod column;
pub mod key;
pub mod pool;


pub use column::{Column, ColumnVec};
pub use key::ColumnVecKey;
pub use pool::ColumnPool;
