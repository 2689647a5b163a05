//! `IterationLogObserver`: bridges `AssignObserver` to `iterations.csv`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ta_assign::{AssignObserver, AssignSummary, IterationStats};

use crate::row::IterationRow;
use crate::{OutputError, OutputResult};

/// An [`AssignObserver`] that appends one convergence row per outer
/// iteration to `iterations.csv`.
///
/// Errors from the writer are stored internally because `AssignObserver`
/// methods have no return value.  After `find_ue` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct IterationLogObserver {
    writer:     Writer<File>,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl IterationLogObserver {
    /// Create `iterations.csv` in `dir` and write its header.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(dir.join("iterations.csv"))?;
        writer.write_record(IterationRow::HEADER)?;
        Ok(Self { writer, rows: 0, last_error: None })
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl AssignObserver for IterationLogObserver {
    fn on_outer_end(&mut self, stats: &IterationStats) {
        let row = IterationRow::from(stats);
        let result = self.writer.write_record(row.record()).map_err(OutputError::from);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_assignment_end(&mut self, _summary: &AssignSummary) {
        let result = self.writer.flush().map_err(OutputError::from);
        self.store_err(result);
    }
}
