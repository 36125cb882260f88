use forest_metrics::Histogram;
use proptest::prelude::*;

proptest! {
    /// Order statistics stay inside the observed range and keep their order.
    #[test]
    fn prop_report_statistics_are_ordered(values in proptest::collection::vec(-1_000i64..1_000, 1..200)) {
        let histogram = Histogram::new();
        for &v in &values {
            histogram.update(v);
        }
        let report = histogram.report().unwrap();

        prop_assert_eq!(report.count, values.len());
        prop_assert_eq!(report.min, *values.iter().min().unwrap());
        prop_assert_eq!(report.max, *values.iter().max().unwrap());

        let (min, max) = (report.min as f64, report.max as f64);
        prop_assert!(min <= report.median && report.median <= max);
        prop_assert!(min <= report.mean + 1e-9 && report.mean <= max + 1e-9);
        prop_assert!(report.median <= report.percentile.p75 + 1e-9);
        prop_assert!(report.percentile.p75 <= report.percentile.p95 + 1e-9);
        prop_assert!(report.percentile.p95 <= report.percentile.p99 + 1e-9);
        prop_assert!(report.std_dev >= 0.0);
    }

    /// Recording order does not change the report.
    #[test]
    fn prop_report_ignores_recording_order(values in proptest::collection::vec(0i64..100, 1..50)) {
        let forward = Histogram::new();
        let backward = Histogram::new();
        for &v in &values {
            forward.update(v);
        }
        for &v in values.iter().rev() {
            backward.update(v);
        }
        prop_assert_eq!(forward.report(), backward.report());
    }
}
