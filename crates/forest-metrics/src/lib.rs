//! Lightweight metrics for observing tree behaviour.
//!
//! Trees record two things through this crate:
//!
//! - **rotations** is a [`Counter`] bumped once per single rotation,
//! - **height** is a [`Histogram`] sampled after every successful mutation.
//!
//! Metrics are shared through [`Arc`] so a tree can keep its instruments
//! while the caller keeps the [`MetricsRegistry`] to read them back.

pub mod histogram;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

pub use histogram::{Histogram, HistogramReport, Percentiles};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("metric `{0}` is not registered")]
    NotFound(String),
    #[error("metric `{name}` is not a {expected}")]
    KindMismatch { name: String, expected: &'static str },
}

/// Signed event counter.
#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicI64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increase(&self, n: i64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    pub fn decrease(&self, n: i64) {
        self.count.fetch_sub(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// A registered metric.
#[derive(Debug, Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Histogram(Arc<Histogram>),
}

impl Metric {
    fn kind(&self) -> &'static str {
        match self {
            Metric::Counter(_) => "counter",
            Metric::Histogram(_) => "histogram",
        }
    }
}

impl From<Arc<Counter>> for Metric {
    fn from(counter: Arc<Counter>) -> Self {
        Metric::Counter(counter)
    }
}

impl From<Arc<Histogram>> for Metric {
    fn from(histogram: Arc<Histogram>) -> Self {
        Metric::Histogram(histogram)
    }
}

/// Name-indexed collection of metrics.
///
/// Registering a name twice replaces the earlier metric.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    registry: BTreeMap<String, Metric>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, metric: impl Into<Metric>) {
        self.registry.insert(name.into(), metric.into());
    }

    pub fn get_metric(&self, name: &str) -> Option<&Metric> {
        self.registry.get(name)
    }

    pub fn counter(&self, name: &str) -> Result<Arc<Counter>, MetricsError> {
        match self.registry.get(name) {
            Some(Metric::Counter(c)) => Ok(Arc::clone(c)),
            Some(_) => Err(MetricsError::KindMismatch {
                name: name.to_string(),
                expected: "counter",
            }),
            None => Err(MetricsError::NotFound(name.to_string())),
        }
    }

    pub fn histogram(&self, name: &str) -> Result<Arc<Histogram>, MetricsError> {
        match self.registry.get(name) {
            Some(Metric::Histogram(h)) => Ok(Arc::clone(h)),
            Some(_) => Err(MetricsError::KindMismatch {
                name: name.to_string(),
                expected: "histogram",
            }),
            None => Err(MetricsError::NotFound(name.to_string())),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// JSON view of every registered metric, keyed by name.
    ///
    /// Counters render as `{"kind": "counter", "count": n}`; histograms as
    /// `{"kind": "histogram", "report": {...}}` with a `null` report when no
    /// sample was recorded yet.
    pub fn snapshot(&self) -> Value {
        let mut out = serde_json::Map::new();
        for (name, metric) in &self.registry {
            let value = match metric {
                Metric::Counter(c) => json!({ "kind": metric.kind(), "count": c.count() }),
                Metric::Histogram(h) => json!({ "kind": metric.kind(), "report": h.report() }),
            };
            out.insert(name.clone(), value);
        }
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_moves_both_ways() {
        let counter = Counter::new();
        counter.increase(1);
        assert_eq!(counter.count(), 1);
        counter.increase(10);
        assert_eq!(counter.count(), 11);
        counter.decrease(1);
        assert_eq!(counter.count(), 10);
        counter.decrease(11);
        assert_eq!(counter.count(), -1);
    }

    #[test]
    fn registry_returns_the_registered_instance() {
        let counter = Arc::new(Counter::new());
        let histogram = Arc::new(Histogram::new());
        let mut registry = MetricsRegistry::new();
        registry.register("counter", Arc::clone(&counter));
        registry.register("histogram", Arc::clone(&histogram));

        assert!(Arc::ptr_eq(&registry.counter("counter").unwrap(), &counter));
        assert!(Arc::ptr_eq(&registry.histogram("histogram").unwrap(), &histogram));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registry_reports_missing_and_mismatched_metrics() {
        let mut registry = MetricsRegistry::new();
        registry.register("rotate", Arc::new(Counter::new()));

        assert_eq!(
            registry.histogram("rotate").unwrap_err(),
            MetricsError::KindMismatch {
                name: "rotate".to_string(),
                expected: "histogram"
            }
        );
        assert_eq!(
            registry.counter("height").unwrap_err(),
            MetricsError::NotFound("height".to_string())
        );
    }

    #[test]
    fn snapshot_renders_every_metric() {
        let mut registry = MetricsRegistry::new();
        let counter = Arc::new(Counter::new());
        counter.increase(3);
        registry.register("avlt.rotate", counter);
        registry.register("avlt.height", Arc::new(Histogram::new()));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot["avlt.rotate"]["count"], 3);
        assert_eq!(snapshot["avlt.height"]["kind"], "histogram");
        assert!(snapshot["avlt.height"]["report"].is_null());
    }
}
