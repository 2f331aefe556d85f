//! Schedule snapshot model.
//!
//! A schedule is a point-in-time copy of every flight holding a runway slot
//! (scheduled or in progress), plus the ids still waiting in the queue. It
//! is detached from the scheduler: mutating the scheduler afterwards does
//! not change a snapshot already taken.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AirlineId, FlightId, FlightState, RunwayId, Time};

/// A flight-runway-time assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Flight identifier.
    pub flight: FlightId,
    /// Owning airline (denormalized for query convenience).
    pub airline: AirlineId,
    /// Assigned runway.
    pub runway: RunwayId,
    /// Slot start.
    pub start: Time,
    /// Slot end (ETA).
    pub eta: Time,
    /// `Scheduled` or `InProgress`.
    pub state: FlightState,
}

impl Assignment {
    /// Creates a scheduled (not yet started) assignment.
    pub fn new(
        flight: FlightId,
        airline: AirlineId,
        runway: RunwayId,
        start: Time,
        eta: Time,
    ) -> Self {
        Self {
            flight,
            airline,
            runway,
            start,
            eta,
            state: FlightState::Scheduled,
        }
    }

    /// Sets the lifecycle state.
    pub fn with_state(mut self, state: FlightState) -> Self {
        self.state = state;
        self
    }

    /// Slot length (`eta - start`).
    #[inline]
    pub fn duration(&self) -> Time {
        self.eta - self.start
    }

    /// Whether the half-open slots `[start, eta)` of two assignments overlap.
    #[inline]
    pub fn overlaps(&self, other: &Assignment) -> bool {
        self.start < other.eta && other.start < self.eta
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[flight{}, airline{}, runway{}, start{}, ETA{}]",
            self.flight, self.airline, self.runway, self.start, self.eta
        )
    }
}

/// Point-in-time view of the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduler clock when the snapshot was taken.
    pub time: Time,
    /// Runways in the pool (ids `1..=runway_count`).
    pub runway_count: u32,
    /// Slot holders, ordered by flight id.
    pub assignments: Vec<Assignment>,
    /// Flights still queued, ordered by flight id.
    pub pending: Vec<FlightId>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(time: Time, runway_count: u32) -> Self {
        Self {
            time,
            runway_count,
            ..Default::default()
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Finds the assignment of a flight.
    pub fn assignment_for_flight(&self, flight: FlightId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.flight == flight)
    }

    /// All assignments on a runway, in slot order.
    pub fn assignments_for_runway(&self, runway: RunwayId) -> Vec<&Assignment> {
        let mut out: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.runway == runway)
            .collect();
        out.sort_by_key(|a| (a.start, a.flight));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new(0, 2);
        s.add_assignment(
            Assignment::new(1, 10, 1, 0, 5).with_state(FlightState::InProgress),
        );
        s.add_assignment(Assignment::new(2, 10, 2, 0, 8));
        s.add_assignment(Assignment::new(3, 20, 1, 5, 10));
        s
    }

    #[test]
    fn test_assignment_lookup() {
        let s = sample_schedule();
        assert_eq!(s.assignment_for_flight(2).unwrap().runway, 2);
        assert!(s.assignment_for_flight(99).is_none());
        let r1: Vec<FlightId> = s.assignments_for_runway(1).iter().map(|a| a.flight).collect();
        assert_eq!(r1, vec![1, 3]);
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = Assignment::new(1, 1, 1, 0, 5);
        let b = Assignment::new(2, 1, 1, 5, 9);
        let c = Assignment::new(3, 1, 1, 4, 6);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_assignment_display() {
        let a = Assignment::new(4, 2, 1, 3, 9);
        assert_eq!(a.to_string(), "[flight4, airline2, runway1, start3, ETA9]");
        assert_eq!(a.duration(), 6);
    }

    #[test]
    fn test_schedule_serde() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
