use std::sync::Mutex;

use serde::Serialize;

/// Records integer samples and summarises them on demand.
#[derive(Debug, Default)]
pub struct Histogram {
    values: Mutex<Vec<i64>>,
}

/// Percentiles reported by [`Histogram::report`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    #[serde(rename = "75")]
    pub p75: f64,
    #[serde(rename = "95")]
    pub p95: f64,
    #[serde(rename = "99")]
    pub p99: f64,
}

/// Summary statistics over the recorded samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramReport {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub median: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub percentile: Percentiles,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, value: i64) {
        self.lock().push(value);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the recorded samples in recording order.
    pub fn values(&self) -> Vec<i64> {
        self.lock().clone()
    }

    /// `None` until at least one sample was recorded.
    pub fn report(&self) -> Option<HistogramReport> {
        let mut sorted = self.values();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_unstable();

        let n = sorted.len() as f64;
        let mean = sorted.iter().map(|&v| v as f64).sum::<f64>() / n;
        let variance = sorted
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Some(HistogramReport {
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: percentile(&sorted, 50.0),
            mean,
            std_dev: variance.sqrt(),
            percentile: Percentiles {
                p75: percentile(&sorted, 75.0),
                p95: percentile(&sorted, 95.0),
                p99: percentile(&sorted, 99.0),
            },
        })
    }

    // A panicking writer cannot leave the sample vector half-updated, so a
    // poisoned lock is still safe to read.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<i64>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Linear interpolation between the two closest ranks. `sorted` must be
/// non-empty and ascending.
fn percentile(sorted: &[i64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let a = sorted[lo] as f64;
    let b = sorted[hi] as f64;
    a + (b - a) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn empty_histogram_has_no_report() {
        assert_eq!(Histogram::new().report(), None);
    }

    #[test]
    fn report_over_zero_to_nine() {
        let histogram = Histogram::new();
        for value in 0..10 {
            histogram.update(value);
        }

        let report = histogram.report().unwrap();
        assert_eq!(report.count, 10);
        assert_eq!(report.min, 0);
        assert_eq!(report.max, 9);
        assert!(approx(report.median, 4.5, 1e-9));
        assert!(approx(report.mean, 4.5, 1e-9));
        assert!(approx(report.std_dev, 2.8723, 1e-3));
        assert!(approx(report.percentile.p75, 6.75, 1e-9));
        assert!(approx(report.percentile.p95, 8.55, 1e-9));
        assert!(approx(report.percentile.p99, 8.91, 1e-9));
    }

    #[test]
    fn single_sample_collapses_every_statistic() {
        let histogram = Histogram::new();
        histogram.update(7);
        let report = histogram.report().unwrap();
        assert_eq!((report.min, report.max), (7, 7));
        assert_eq!(report.median, 7.0);
        assert_eq!(report.std_dev, 0.0);
        assert_eq!(report.percentile.p99, 7.0);
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let histogram = Histogram::new();
        histogram.update(1);
        histogram.update(3);
        let json = serde_json::to_value(histogram.report().unwrap()).unwrap();
        assert_eq!(json["stdDev"], 1.0);
        assert_eq!(json["percentile"]["75"], 2.5);
    }
}
