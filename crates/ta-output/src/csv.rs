//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agents.csv`: one row per path with positive flow
//! - `link_performance.csv`: one row per physical link and demand period

use std::fs::File;
use std::path::Path;

use csv::Writer;
use rayon::prelude::*;

use ta_assign::Assignment;
use ta_column::{ColumnVec, ColumnVecKey};

use crate::OutputResult;
use crate::row::{ColumnRow, LinkPerformanceRow, column_rows};

/// Writes assignment results to two CSV files.
pub struct CsvWriter {
    agents:   Writer<File>,
    links:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut agents = Writer::from_path(dir.join("agents.csv"))?;
        agents.write_record(ColumnRow::HEADER)?;

        let mut links = Writer::from_path(dir.join("link_performance.csv"))?;
        links.write_record(LinkPerformanceRow::HEADER)?;

        Ok(Self { agents, links, finished: false })
    }

    /// Write every positive-flow column in key order.  Returns the row count.
    pub fn write_columns(&mut self, assignment: &Assignment) -> OutputResult<usize> {
        let entries: Vec<(&ColumnVecKey, &ColumnVec)> = assignment.columns().iter().collect();
        let rows = column_rows(assignment.network(), assignment.settings(), &entries);
        self.write_column_rows(&rows, 0)
    }

    /// Like [`write_columns`](Self::write_columns), but formats rows on
    /// Rayon's pool over `parts` contiguous key ranges.  The file content is
    /// identical.
    pub fn write_columns_parallel(
        &mut self,
        assignment: &Assignment,
        parts: usize,
    ) -> OutputResult<usize> {
        let entries: Vec<(&ColumnVecKey, &ColumnVec)> = assignment.columns().iter().collect();
        let chunk = entries.len().div_ceil(parts.max(1)).max(1);
        let network = assignment.network();
        let settings = assignment.settings();

        let chunks: Vec<Vec<ColumnRow>> = entries
            .par_chunks(chunk)
            .map(|part| column_rows(network, settings, part))
            .collect();

        let mut written = 0;
        for rows in &chunks {
            written += self.write_column_rows(rows, written)?;
        }
        Ok(written)
    }

    fn write_column_rows(&mut self, rows: &[ColumnRow], first_id: usize) -> OutputResult<usize> {
        for (i, row) in rows.iter().enumerate() {
            self.agents.write_record(row.record(first_id + i))?;
        }
        Ok(rows.len())
    }

    /// Write every physical link for every demand period.  Returns the row
    /// count.
    pub fn write_link_performance(&mut self, assignment: &Assignment) -> OutputResult<usize> {
        let network = assignment.network();
        let mut written = 0;
        for dp in assignment.settings().demand_periods() {
            for perf in assignment.link_performance(dp.id) {
                let row = LinkPerformanceRow::new(network, &dp.name, &perf);
                self.links.write_record(row.record())?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Flush both files.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.links.flush()?;
        Ok(())
    }
}
