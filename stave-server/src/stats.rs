//! Per-component render timing statistics.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::time::Duration;

use serde::Serialize;

/// Aggregated timings for one component, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentStats {
    /// Number of successful renders.
    pub count: u64,
    /// Sum of all render times.
    pub total_time_ms: f64,
    /// Mean render time.
    pub avg_time_ms: f64,
    /// Fastest render.
    pub min_time_ms: f64,
    /// Slowest render.
    pub max_time_ms: f64,
}

impl ComponentStats {
    fn first(ms: f64) -> Self {
        Self {
            count: 1,
            total_time_ms: ms,
            avg_time_ms: ms,
            min_time_ms: ms,
            max_time_ms: ms,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn record(&mut self, ms: f64) {
        self.count += 1;
        self.total_time_ms += ms;
        self.avg_time_ms = self.total_time_ms / self.count as f64;
        self.min_time_ms = self.min_time_ms.min(ms);
        self.max_time_ms = self.max_time_ms.max(ms);
    }
}

/// Thread-safe collection of [`ComponentStats`] keyed by component name.
#[derive(Debug, Default)]
pub struct RenderStats {
    inner: RwLock<HashMap<String, ComponentStats>>,
}

impl RenderStats {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one render of `component` that took `elapsed`.
    pub fn record(&self, component: &str, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.get_mut(component) {
            Some(stats) => stats.record(ms),
            None => {
                inner.insert(component.to_string(), ComponentStats::first(ms));
            }
        }
    }

    /// Statistics for one component, if it has rendered since the last clear.
    #[must_use]
    pub fn get(&self, component: &str) -> Option<ComponentStats> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(component)
            .copied()
    }

    /// Copy of every entry, ordered by component name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, ComponentStats> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|(name, stats)| (name.clone(), *stats))
            .collect()
    }

    /// Drop all recorded statistics.
    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_aggregates() {
        let stats = RenderStats::new();
        stats.record("UserList", Duration::from_millis(10));
        stats.record("UserList", Duration::from_millis(30));
        stats.record("UserList", Duration::from_millis(20));

        let s = stats.get("UserList").expect("recorded");
        assert_eq!(s.count, 3);
        assert!((s.total_time_ms - 60.0).abs() < 1e-9);
        assert!((s.avg_time_ms - 20.0).abs() < 1e-9);
        assert!((s.min_time_ms - 10.0).abs() < 1e-9);
        assert!((s.max_time_ms - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_components_are_independent() {
        let stats = RenderStats::new();
        stats.record("A", Duration::from_millis(1));
        stats.record("B", Duration::from_millis(2));
        stats.record("B", Duration::from_millis(4));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(snapshot["A"].count, 1);
        assert_eq!(snapshot["B"].count, 2);
    }

    #[test]
    fn test_clear() {
        let stats = RenderStats::new();
        stats.record("A", Duration::from_millis(1));
        stats.clear();

        assert!(stats.get("A").is_none());
        assert!(stats.snapshot().is_empty());
    }

    #[test]
    fn test_serializes_field_names() {
        let stats = RenderStats::new();
        stats.record("A", Duration::from_millis(5));

        let json = serde_json::to_value(stats.snapshot()).expect("serialize");
        assert_eq!(json["A"]["count"], 1);
        assert!(json["A"]["avg_time_ms"].is_number());
    }
}
