//! Integration tests for qs-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{JourneyRow, Outcome, PoolRow, StageRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("journeys.csv").exists());
        assert!(dir.path().join("stages.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("journeys.csv")),
            ["entity", "outcome", "arrival", "left_at", "total_time", "total_wait", "stages"]
        );
        assert_eq!(headers(dir.path().join("stages.csv"))[2], "pool");
        assert_eq!(headers(dir.path().join("summary.csv"))[5], "utilization_pct");
    }

    #[test]
    fn transition_stage_has_empty_pool() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_stage(&StageRow {
            entity:               3,
            stage:                1,
            pool:                 None,
            enqueued_at:          5.0,
            granted_at:           5.0,
            released_at:          8.0,
            wait:                 0.0,
            hold:                 3.0,
            queue_len_at_enqueue: 0,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("stages.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][2], "");
        assert_eq!(&rows[0][7], "3");
    }

    #[test]
    fn journey_and_pool_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_journey(&JourneyRow {
            entity:     0,
            outcome:    Outcome::Abandoned,
            arrival:    1.0,
            left_at:    4.5,
            total_time: 3.5,
            total_wait: 3.5,
            stages:     0,
        })
        .unwrap();
        w.write_pool_summaries(&[PoolRow {
            pool:               0,
            name:               "desk".into(),
            capacity:           2,
            grants:             7,
            busy_time:          30.0,
            utilization_pct:    75.0,
            time_avg_queue_len: 0.25,
            max_queue_len:      2,
        }])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("journeys.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][1], "abandoned");
        assert_eq!(&rows[0][4], "3.5");

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][1], "desk");
        assert_eq!(&rows[0][5], "75");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_pool_summary_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_pool_summaries(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use qs_sample::Fixed;
    use qs_sim::{ArrivalLimit, SimBuilder, StageSpec};

    use crate::csv::CsvWriter;
    use crate::observer::RecordOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn rows(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn integration_csv() {
        // Two arrivals at t=0 share one desk; the second waits 4 then walks.
        let mut sim = SimBuilder::new(1, Fixed(0.0), ArrivalLimit::Count(2))
            .pool("desk", 1)
            .stage(StageSpec::service("serve", "desk", Fixed(4.0)))
            .stage(StageSpec::transition("walk", Fixed(1.0)))
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = RecordOutputObserver::new(writer);
        let summary = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        obs.write_summary(&summary).unwrap();

        let journeys = rows(dir.path().join("journeys.csv"));
        assert_eq!(journeys.len(), 2);
        assert_eq!(&journeys[1][0], "1");
        assert_eq!(&journeys[1][1], "served");
        assert_eq!(&journeys[1][5], "4");

        // 2 entities × 2 stages.
        assert_eq!(rows(dir.path().join("stages.csv")).len(), 4);

        let pools = rows(dir.path().join("summary.csv"));
        assert_eq!(pools.len(), 1);
        assert_eq!(&pools[0][1], "desk");
        assert_eq!(&pools[0][3], "2");
    }

    #[test]
    fn abandoned_journey_is_written() {
        let mut sim = SimBuilder::new(1, Fixed(0.0), ArrivalLimit::Count(2))
            .pool("desk", 1)
            .stage(StageSpec::service("serve", "desk", Fixed(10.0)).with_patience(Fixed(2.0)))
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = RecordOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let summary = sim.run(&mut obs).unwrap();
        obs.write_summary(&summary).unwrap();

        let journeys = rows(dir.path().join("journeys.csv"));
        assert_eq!(journeys.len(), 2);
        // The abandonment at t=2 is written before the completion at t=10.
        assert_eq!(&journeys[0][0], "1");
        assert_eq!(&journeys[0][1], "abandoned");
        assert_eq!(&journeys[0][5], "2");
        assert_eq!(&journeys[1][1], "served");
    }

    #[test]
    fn abandoned_journey_carries_earlier_stages() {
        // Entity 1 waits 3 at intake, then gives up after 2 more at the desk.
        let mut sim = SimBuilder::new(1, Fixed(0.0), ArrivalLimit::Count(2))
            .pool("intake", 1)
            .pool("desk", 1)
            .stage(StageSpec::service("intake", "intake", Fixed(3.0)))
            .stage(StageSpec::service("serve", "desk", Fixed(10.0)).with_patience(Fixed(2.0)))
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = RecordOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let summary = sim.run(&mut obs).unwrap();
        obs.write_summary(&summary).unwrap();

        let journeys = rows(dir.path().join("journeys.csv"));
        assert_eq!(journeys.len(), 2);
        assert_eq!(&journeys[0][0], "1");
        assert_eq!(&journeys[0][1], "abandoned");
        assert_eq!(&journeys[0][3], "8");
        assert_eq!(&journeys[0][5], "5");
        assert_eq!(&journeys[0][6], "1");
        assert_eq!(&journeys[1][0], "0");
        assert_eq!(&journeys[1][6], "2");
    }
}
