// ABOUTME: Timing helpers for engine operations: a span-backed drop timer and running totals
// ABOUTME: Slow operations log a warning when a threshold is set on the timer

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Records its elapsed time on the `perf_timer` span when dropped
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: &'static str,
    warn_threshold: Option<Duration>,
}

impl PerfTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            span: span!(Level::DEBUG, "perf_timer", operation, elapsed_ms = field::Empty),
            start: Instant::now(),
            operation,
            warn_threshold: None,
        }
    }

    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.span.record("elapsed_ms", elapsed_ms);

        if let Some(threshold) = self.warn_threshold.filter(|t| elapsed > *t) {
            warn!(
                operation = self.operation,
                elapsed_ms,
                threshold_ms = threshold.as_secs_f64() * 1000.0,
                "Slow operation detected"
            );
        }
    }
}

/// Running totals for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationStats {
    pub count: u64,
    pub total: Duration,
    pub max: Duration,
}

impl OperationStats {
    pub fn average(&self) -> Duration {
        match u32::try_from(self.count) {
            Ok(0) => Duration::ZERO,
            Ok(count) => self.total / count,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.count as f64),
        }
    }
}

/// Per-operation timing aggregator
#[derive(Debug, Default)]
pub struct PerfStats {
    operations: HashMap<&'static str, OperationStats>,
}

impl PerfStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, operation: &'static str, duration: Duration) {
        let stats = self.operations.entry(operation).or_default();
        stats.count += 1;
        stats.total += duration;
        stats.max = stats.max.max(duration);
    }

    pub fn get(&self, operation: &str) -> Option<OperationStats> {
        self.operations.get(operation).copied()
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }
}
