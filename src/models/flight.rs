//! Flight (request) model.
//!
//! A flight is a request for exclusive use of one runway for `duration`
//! time units. It moves through a forward-only lifecycle, except that a
//! scheduled flight may be demoted back to pending when the schedule is
//! re-packed.
//!
//! # Time Representation
//! Times are abstract integer ticks relative to the scheduler epoch. The
//! caller decides what one tick means.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Caller-supplied flight identifier.
pub type FlightId = u32;
/// Submitter (airline) identifier.
pub type AirlineId = u32;
/// Runway identifier, assigned `1..=n` in creation order.
pub type RunwayId = u32;
/// Scheduler clock value.
///
/// Every `submit_time + duration` must fit in an `i64`; submissions that
/// overflow are rejected, and a flight whose slot would end past
/// `Time::MAX` stays pending.
pub type Time = i64;
/// Flight priority (higher = more urgent).
pub type Priority = i32;

/// A flight submission.
///
/// Immutable after admission except for `priority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRequest {
    /// Unique flight identifier.
    pub flight: FlightId,
    /// Submitting airline.
    pub airline: AirlineId,
    /// Time the request entered the system.
    pub submit_time: Time,
    /// Scheduling priority (higher = served first).
    pub priority: Priority,
    /// Runway occupancy length.
    pub duration: Time,
}

impl FlightRequest {
    /// Creates a request with priority 0 and zero duration.
    pub fn new(flight: FlightId, airline: AirlineId) -> Self {
        Self {
            flight,
            airline,
            submit_time: 0,
            priority: 0,
            duration: 0,
        }
    }

    /// Sets the submit time.
    pub fn with_submit_time(mut self, submit_time: Time) -> Self {
        self.submit_time = submit_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the runway occupancy length.
    pub fn with_duration(mut self, duration: Time) -> Self {
        self.duration = duration;
        self
    }
}

/// Lifecycle state of a flight.
///
/// `Pending → Scheduled → InProgress → Completed`, plus the demotion edge
/// `Scheduled → Pending` during a re-pack. `InProgress` and `Completed`
/// are final as far as every mutating operation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightState {
    /// Waiting in the priority queue.
    Pending,
    /// Holds a runway slot that has not started yet.
    Scheduled,
    /// Occupying its runway; cannot be moved.
    InProgress,
    /// Runway released.
    Completed,
}

impl FlightState {
    /// Whether the flight has started (cannot be canceled or re-prioritized).
    pub fn has_departed(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

/// Queue entry for a pending flight.
///
/// Ordered so that the *greatest* entry is served first:
/// higher priority, then earlier submit time, then smaller flight id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFlight {
    /// Priority at the time of queueing.
    pub priority: Priority,
    /// Original submit time.
    pub submit_time: Time,
    /// Flight identifier.
    pub flight: FlightId,
    /// Full request payload.
    pub request: FlightRequest,
}

impl PendingFlight {
    /// Builds the queue entry from a request's current priority and submit time.
    pub fn from_request(request: FlightRequest) -> Self {
        Self {
            priority: request.priority,
            submit_time: request.submit_time,
            flight: request.flight,
            request,
        }
    }

    /// Same entry with a new priority (payload updated too).
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self.request.priority = priority;
        self
    }
}

impl Ord for PendingFlight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.submit_time.cmp(&self.submit_time))
            .then_with(|| other.flight.cmp(&self.flight))
    }
}

impl PartialOrd for PendingFlight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PendingFlight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingFlight {}

/// A flight holding a runway slot (`Scheduled` or `InProgress`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFlight {
    /// Assigned runway.
    pub runway: RunwayId,
    /// Slot start.
    pub start: Time,
    /// Estimated completion (`start + duration`).
    pub eta: Time,
    /// Request payload.
    pub request: FlightRequest,
}

impl ActiveFlight {
    /// Whether the slot has started at `now`.
    #[inline]
    pub fn has_started(&self, now: Time) -> bool {
        self.start <= now
    }
}

/// Completion-ordering key: `(eta, flight)` ascending.
///
/// Field order drives the derived `Ord`; `runway` only rides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Estimated completion time.
    pub eta: Time,
    /// Flight identifier.
    pub flight: FlightId,
    /// Runway the flight occupies.
    pub runway: RunwayId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(flight: FlightId, submit: Time, priority: Priority) -> PendingFlight {
        PendingFlight::from_request(
            FlightRequest::new(flight, 1)
                .with_submit_time(submit)
                .with_priority(priority)
                .with_duration(10),
        )
    }

    #[test]
    fn test_request_builder() {
        let r = FlightRequest::new(7, 3)
            .with_submit_time(12)
            .with_priority(4)
            .with_duration(30);
        assert_eq!(r.flight, 7);
        assert_eq!(r.airline, 3);
        assert_eq!(r.submit_time, 12);
        assert_eq!(r.priority, 4);
        assert_eq!(r.duration, 30);
    }

    #[test]
    fn test_pending_order_priority_first() {
        assert!(pending(1, 0, 9) > pending(2, 0, 5));
        assert!(pending(1, 100, 9) > pending(2, 0, 5));
    }

    #[test]
    fn test_pending_order_submit_time_then_id() {
        assert!(pending(5, 0, 5) > pending(1, 3, 5));
        assert!(pending(1, 0, 5) > pending(2, 0, 5));
        assert_eq!(pending(1, 0, 5), pending(1, 0, 5));
    }

    #[test]
    fn test_pending_with_priority_updates_payload() {
        let p = pending(1, 0, 5).with_priority(100);
        assert_eq!(p.priority, 100);
        assert_eq!(p.request.priority, 100);
    }

    #[test]
    fn test_timetable_order() {
        let a = TimetableEntry { eta: 10, flight: 2, runway: 1 };
        let b = TimetableEntry { eta: 10, flight: 3, runway: 1 };
        let c = TimetableEntry { eta: 5, flight: 9, runway: 2 };
        let mut v = vec![b, a, c];
        v.sort();
        assert_eq!(v, vec![c, a, b]);
    }

    #[test]
    fn test_departed_states() {
        assert!(!FlightState::Pending.has_departed());
        assert!(!FlightState::Scheduled.has_departed());
        assert!(FlightState::InProgress.has_departed());
        assert!(FlightState::Completed.has_departed());
    }

    #[test]
    fn test_request_serde() {
        let r = FlightRequest::new(1, 2).with_priority(3).with_duration(4);
        let json = serde_json::to_string(&r).unwrap();
        let back: FlightRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
