//! `ta-output`: CSV writers for assignment results.
//!
//! | Type                   | Files created                                 |
//! |------------------------|-----------------------------------------------|
//! | [`CsvWriter`]          | `agents.csv`, `link_performance.csv`          |
//! | [`IterationLogObserver`] | `iterations.csv` (one row per outer iteration) |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ta_output::{CsvWriter, IterationLogObserver};
//!
//! let mut log = IterationLogObserver::new(Path::new("./output"))?;
//! assignment.find_ue(&mut log)?;
//! log.take_error().map(|e| eprintln!("output error: {e}"));
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_columns_parallel(&assignment, 8)?;
//! writer.write_link_performance(&assignment)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::IterationLogObserver;
pub use row::{ColumnRow, IterationRow, LinkPerformanceRow};
