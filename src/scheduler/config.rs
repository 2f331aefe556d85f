//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::models::Time;

/// Startup parameters for a [`SlotScheduler`](super::SlotScheduler).
///
/// Serializable so hosts can keep it next to their own settings.
///
/// # Example
/// ```
/// use u_slot::scheduler::{SchedulerConfig, SlotScheduler};
///
/// let config = SchedulerConfig::new().with_runway_count(3).with_start_time(100);
/// let (scheduler, log) = SlotScheduler::from_config(&config);
/// assert_eq!(scheduler.runway_count(), 3);
/// assert_eq!(scheduler.now(), 100);
/// assert_eq!(log.to_string(), "3 Runways are now available\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Runways seeded at startup (must be positive).
    pub runway_count: i32,
    /// Clock value the scheduler starts at.
    pub start_time: Time,
}

impl SchedulerConfig {
    /// One runway, clock at zero.
    pub fn new() -> Self {
        Self {
            runway_count: 1,
            start_time: 0,
        }
    }

    /// Sets the initial runway count.
    pub fn with_runway_count(mut self, runway_count: i32) -> Self {
        self.runway_count = runway_count;
        self
    }

    /// Sets the starting clock value.
    pub fn with_start_time(mut self, start_time: Time) -> Self {
        self.start_time = start_time;
        self
    }

    /// Checks the values without building a scheduler.
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.runway_count <= 0 {
            return Err(Rejection::InvalidInitialRunwayCount {
                count: self.runway_count,
            });
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.runway_count, 1);
        assert_eq!(c.start_time, 0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_invalid_runway_count() {
        let c = SchedulerConfig::new().with_runway_count(0);
        assert_eq!(
            c.validate(),
            Err(Rejection::InvalidInitialRunwayCount { count: 0 })
        );
    }

    #[test]
    fn test_partial_json() {
        let c: SchedulerConfig = serde_json::from_str(r#"{"runway_count": 4}"#).unwrap();
        assert_eq!(c, SchedulerConfig::new().with_runway_count(4));
    }
}
