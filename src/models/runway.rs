//! Runway model.
//!
//! Runways are the reusable resource. A runway is fully described by its id
//! and the time it next becomes free; the pool orders runways by
//! `(available_at, runway)` so the earliest-free runway is taken first and
//! ties go to the lowest id.

use serde::{Deserialize, Serialize};

use super::{RunwayId, Time};

/// A runway and the time it next becomes available.
///
/// Field order drives the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunwaySlot {
    /// Next time the runway is free.
    pub available_at: Time,
    /// Runway identifier.
    pub runway: RunwayId,
}

impl RunwaySlot {
    /// Creates a slot.
    pub fn new(runway: RunwayId, available_at: Time) -> Self {
        Self {
            available_at,
            runway,
        }
    }

    /// Earliest start for work that cannot begin before `now`.
    #[inline]
    pub fn start_at(&self, now: Time) -> Time {
        self.available_at.max(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_time_then_id() {
        let mut v = vec![
            RunwaySlot::new(2, 5),
            RunwaySlot::new(1, 7),
            RunwaySlot::new(1, 5),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                RunwaySlot::new(1, 5),
                RunwaySlot::new(2, 5),
                RunwaySlot::new(1, 7)
            ]
        );
    }

    #[test]
    fn test_start_at() {
        let slot = RunwaySlot::new(1, 20);
        assert_eq!(slot.start_at(10), 20);
        assert_eq!(slot.start_at(30), 30);
    }
}
