//! Configuration for the worker host

use crate::error::WorkerError;
use serde::{Deserialize, Serialize};

/// Configuration for the solver worker and its host.
///
/// # Examples
///
/// ```
/// use fabula_worker::WorkerConfig;
///
/// let config = WorkerConfig::default();
/// assert_eq!(config.max_crash_retries, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Capacity of the request and response channels. The host issues one
    /// request at a time, so a small buffer is plenty.
    pub channel_capacity: usize,

    /// How many times a request is retried on a fresh worker after the
    /// previous worker died mid-request.
    pub max_crash_retries: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 16,
            max_crash_retries: 2,
        }
    }
}

impl WorkerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.channel_capacity == 0 {
            return Err(WorkerError::Config(
                "channel_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorkerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = WorkerConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = WorkerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: WorkerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
