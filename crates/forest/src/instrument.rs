//! Hooks from the trees into `forest-metrics`.

use std::sync::Arc;

use forest_metrics::{Counter, Histogram, MetricsRegistry};

/// Optional rotation counter and height histogram owned by a tree.
#[derive(Clone, Debug, Default)]
pub(crate) struct Instruments {
    rotate: Option<Arc<Counter>>,
    height: Option<Arc<Histogram>>,
}

impl Instruments {
    /// Registers a `<prefix>.height` histogram.
    pub fn heights(registry: &mut MetricsRegistry, prefix: &str) -> Self {
        let height = Arc::new(Histogram::new());
        registry.register(format!("{prefix}.height"), Arc::clone(&height));
        Self {
            rotate: None,
            height: Some(height),
        }
    }

    /// Registers `<prefix>.rotate` and `<prefix>.height`.
    pub fn rotations_and_heights(registry: &mut MetricsRegistry, prefix: &str) -> Self {
        let rotate = Arc::new(Counter::new());
        registry.register(format!("{prefix}.rotate"), Arc::clone(&rotate));
        Self {
            rotate: Some(rotate),
            ..Self::heights(registry, prefix)
        }
    }

    pub fn rotated(&self, rotations: u32) {
        if let Some(c) = &self.rotate {
            c.increase(i64::from(rotations));
        }
    }

    /// `height` only runs when a histogram is attached.
    pub fn sample_height(&self, height: impl FnOnce() -> i32) {
        if let Some(h) = &self.height {
            h.update(i64::from(height()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_under_prefix() {
        let mut registry = MetricsRegistry::new();
        let instruments = Instruments::rotations_and_heights(&mut registry, "avlt");
        instruments.rotated(2);
        instruments.rotated(0);
        instruments.sample_height(|| 3);

        assert_eq!(registry.counter("avlt.rotate").unwrap().count(), 2);
        assert_eq!(registry.histogram("avlt.height").unwrap().values(), vec![3]);
    }

    #[test]
    fn detached_instruments_are_silent() {
        let instruments = Instruments::default();
        instruments.rotated(1);
        instruments.sample_height(|| panic!("height computed without a histogram"));
    }
}
