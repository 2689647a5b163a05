//! Integration tests for ta-output.

#[cfg(test)]
mod helpers {
    use ta_assign::{Assignment, AssignmentBuilder, NoopObserver};
    use ta_column::ColumnPool;
    use ta_core::{AgentTypeId, AssignConfig, PeriodId};
    use ta_demand::{Settings, add_demand};
    use ta_network::{LinkSpec, NetworkBuilder, NodeSpec};

    pub fn tmp() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Zones A (node 1), B (node 2), C (node 5) on a small tree:
    /// 1 → 3 → 2 and 1 → 3 → 5, plus 2 → 1.
    pub fn assignment(config: AssignConfig) -> Assignment {
        let mut b = NetworkBuilder::new(1);
        b.add_node(NodeSpec::new("1", "A").at(0.0, 0.0).activity());
        b.add_node(NodeSpec::new("2", "B").at(2.0, 0.0).activity());
        b.add_node(NodeSpec::new("3", "-1").at(1.0, 0.0));
        b.add_node(NodeSpec::new("5", "C").at(1.0, 1.0).activity());

        let mut l13 = LinkSpec::new("a", "1", "3", 1.0).capacity(500.0);
        l13.geometry = "LINESTRING (0 0, 1 0)".into();
        b.add_link(l13);
        b.add_link(LinkSpec::new("b", "3", "2", 1.0).capacity(500.0));
        b.add_link(LinkSpec::new("c", "3", "5", 2.0).capacity(500.0));
        b.add_link(LinkSpec::new("d", "2", "1", 2.0).capacity(500.0));
        let net = b.build();

        let mut columns = ColumnPool::new();
        for (o, d, v) in [("A", "B", 100.0), ("A", "C", 40.0), ("B", "A", 25.5)] {
            add_demand(&net, &mut columns, o, d, PeriodId(0), AgentTypeId(0), v);
        }

        let mut a = AssignmentBuilder::new(config, net, Settings::auto(), columns)
            .build()
            .unwrap();
        a.find_ue(&mut NoopObserver).unwrap();
        a
    }

    pub fn read(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }
}

// ── CsvWriter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use ta_core::AssignConfig;

    use super::helpers::{assignment, read, tmp};
    use crate::row::{ColumnRow, LinkPerformanceRow};
    use crate::CsvWriter;

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (agents, rows) = read(&dir.path().join("agents.csv"));
        assert_eq!(agents, ColumnRow::HEADER);
        assert!(rows.is_empty());

        let (links, _) = read(&dir.path().join("link_performance.csv"));
        assert_eq!(links, LinkPerformanceRow::HEADER);
    }

    #[test]
    fn agents_rows_list_paths() {
        let a = assignment(AssignConfig::new(2, 2));
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        assert_eq!(w.write_columns(&a).unwrap(), 3);
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("agents.csv"));
        assert_eq!(rows.len(), 3);

        // Key order: (A,B), (A,C), (B,A).
        let ab = &rows[0];
        assert_eq!(&ab[0], "0");
        assert_eq!(&ab[1], "A");
        assert_eq!(&ab[2], "B");
        assert_eq!(&ab[3], "0");
        assert_eq!(&ab[4], "auto");
        assert_eq!(&ab[5], "AM");
        assert_eq!(&ab[6], "100");
        assert_eq!(&ab[9], "1;3;2");
        assert_eq!(&ab[10], "a;b");
        assert_eq!(&ab[11], "LINESTRING (0 0, 1 0, 2 0)");

        assert_eq!(&rows[1][9], "1;3;5");
        assert_eq!(&rows[2][1], "B");
        assert_eq!(&rows[2][6], "25.5");
        assert_eq!(&rows[2][10], "d");
        assert_eq!(&rows[2][0], "2");
    }

    #[test]
    fn parallel_output_matches_sequential() {
        let a = assignment(AssignConfig::new(2, 2));

        let seq = tmp();
        let mut w = CsvWriter::new(seq.path()).unwrap();
        w.write_columns(&a).unwrap();
        w.finish().unwrap();

        for parts in [1, 2, 3, 16] {
            let par = tmp();
            let mut w = CsvWriter::new(par.path()).unwrap();
            assert_eq!(w.write_columns_parallel(&a, parts).unwrap(), 3);
            w.finish().unwrap();

            let expected = std::fs::read_to_string(seq.path().join("agents.csv")).unwrap();
            let got = std::fs::read_to_string(par.path().join("agents.csv")).unwrap();
            assert_eq!(got, expected, "parts = {parts}");
        }
    }

    #[test]
    fn link_performance_rows() {
        let a = assignment(AssignConfig::new(2, 2));
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        assert_eq!(w.write_link_performance(&a).unwrap(), 4);
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("link_performance.csv"));
        assert_eq!(rows.len(), 4);

        let first = &rows[0];
        assert_eq!(&first[0], "a");
        assert_eq!(&first[1], "1");
        assert_eq!(&first[2], "3");
        assert_eq!(&first[3], "AM");
        // A→B and A→C both use link a.
        assert_eq!(&first[4], "140");
        assert_eq!(&first[8], "LINESTRING (0 0, 1 0)");
        let voc: f64 = first[7].parse().unwrap();
        assert!((voc - 0.28).abs() < 1e-12);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── IterationLogObserver ──────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::time::Duration;

    use ta_assign::{AssignObserver, AssignSummary, IterationStats};

    use super::helpers::{read, tmp};
    use crate::row::IterationRow;
    use crate::IterationLogObserver;

    fn stats(iteration: u16, gap: f64) -> IterationStats {
        IterationStats {
            iteration,
            relative_gap:      gap,
            total_travel_time: 1000.0,
            column_count:      3,
            elapsed:           Duration::from_millis(250),
        }
    }

    #[test]
    fn one_row_per_outer_iteration() {
        let dir = tmp();
        let mut obs = IterationLogObserver::new(dir.path()).unwrap();
        obs.on_outer_end(&stats(0, 0.5));
        obs.on_outer_end(&stats(1, 0.125));
        obs.on_assignment_end(&AssignSummary {
            iterations:        2,
            relative_gap:      0.125,
            total_travel_time: 1000.0,
            column_count:      3,
            unassigned_keys:   0,
            converged:         false,
        });
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows(), 2);

        let (headers, rows) = read(&dir.path().join("iterations.csv"));
        assert_eq!(headers, IterationRow::HEADER);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "0.125");
        assert_eq!(&rows[1][4], "0.25");
    }

    #[test]
    fn drives_a_real_assignment() {
        let dir = tmp();
        let mut obs = IterationLogObserver::new(dir.path()).unwrap();

        let mut a = super::helpers::assignment(ta_core::AssignConfig::new(1, 1));
        a.find_ue(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows(), 1);
    }
}
