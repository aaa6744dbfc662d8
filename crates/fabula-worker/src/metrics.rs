//! Metrics collection for the worker host

/// Counters the host keeps while shepherding the worker.
///
/// Useful for diagnosing a flapping worker or an editor issuing requests
/// faster than solves complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostMetrics {
    /// Requests handed to the worker.
    pub requests_issued: u64,

    /// Results that matched the outstanding request id.
    pub results_delivered: u64,

    /// Error answers that matched the outstanding request id.
    pub errors_delivered: u64,

    /// Answers dropped because a newer request superseded theirs.
    pub stale_discarded: u64,

    /// Times the worker died with a request outstanding.
    pub worker_crashes: u64,

    /// Fresh workers spawned after a crash.
    pub respawns: u64,
}

impl HostMetrics {
    /// Create new empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request handed to the worker.
    pub fn record_request(&mut self) {
        self.requests_issued += 1;
    }

    /// Record a matching result.
    pub fn record_result(&mut self) {
        self.results_delivered += 1;
    }

    /// Record a matching error answer.
    pub fn record_error(&mut self) {
        self.errors_delivered += 1;
    }

    /// Record a stale answer dropped on arrival.
    pub fn record_stale(&mut self) {
        self.stale_discarded += 1;
    }

    /// Record a worker death.
    pub fn record_crash(&mut self) {
        self.worker_crashes += 1;
    }

    /// Record a respawn.
    pub fn record_respawn(&mut self) {
        self.respawns += 1;
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of the counters.
    pub fn summary(&self) -> String {
        format!(
            "Solver host metrics\n\
             ===================\n\
             Requests issued:   {}\n\
             Results delivered: {}\n\
             Errors delivered:  {}\n\
             Stale discarded:   {}\n\
             Worker crashes:    {}\n\
             Respawns:          {}",
            self.requests_issued,
            self.results_delivered,
            self.errors_delivered,
            self.stale_discarded,
            self.worker_crashes,
            self.respawns,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut metrics = HostMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_result();
        metrics.record_stale();

        assert_eq!(metrics.requests_issued, 2);
        assert_eq!(metrics.results_delivered, 1);
        assert_eq!(metrics.stale_discarded, 1);
        assert_eq!(metrics.worker_crashes, 0);
    }

    #[test]
    fn test_reset() {
        let mut metrics = HostMetrics::new();
        metrics.record_request();
        metrics.record_crash();
        metrics.reset();
        assert_eq!(metrics, HostMetrics::new());
    }

    #[test]
    fn test_summary_names_every_counter() {
        let mut metrics = HostMetrics::new();
        metrics.record_request();
        metrics.record_respawn();
        let summary = metrics.summary();
        assert!(summary.contains("Requests issued:   1"));
        assert!(summary.contains("Respawns:          1"));
    }
}
