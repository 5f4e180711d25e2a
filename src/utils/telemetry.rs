// file: src/utils/telemetry.rs
// description: timing of search requests and dataset loads
// reference: elapsed time logged through tracing

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Searches slower than this are logged as warnings.
pub const SLOW_SEARCH: Duration = Duration::from_millis(250);

/// Operation timer for performance tracking
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting operation: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            "Completed operation: {} in {:.2}ms",
            self.operation,
            elapsed.as_secs_f64() * 1000.0
        );
        elapsed
    }

    /// Logs the result count alongside the elapsed time.
    pub fn finish_with_count(self, count: usize) -> Duration {
        self.warn_if_slow(SLOW_SEARCH);
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} - {} results in {:.2}ms",
            self.operation,
            count,
            elapsed.as_secs_f64() * 1000.0
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: took {:.2}ms (threshold: {:.2}ms)",
                self.operation,
                elapsed.as_secs_f64() * 1000.0,
                threshold.as_secs_f64() * 1000.0
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_timer() {
        let timer = OperationTimer::new("search");
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.finish_with_count(3);
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_elapsed_grows() {
        let timer = OperationTimer::new("load");
        let first = timer.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() > first);
        timer.warn_if_slow(Duration::from_secs(60));
    }
}
