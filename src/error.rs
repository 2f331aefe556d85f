//! Error types.
//!
//! Two classes:
//!
//! - [`Rejection`]: the caller asked for something invalid (unknown flight,
//!   duplicate id, bad range). The operation is refused without mutating the
//!   schedule and the rejection is reported inside the returned
//!   [`EventLog`](crate::models::EventLog).
//! - [`SchedulerError`]: an internal structure disagrees with the registry.
//!   The schedule can no longer be trusted; the operation stops and the error
//!   is returned to the caller.

use serde::{Deserialize, Serialize};

use crate::heap::HeapError;
use crate::models::{AirlineId, FlightId, FlightState};

/// A refused operation. Never fatal.
///
/// `Display` reproduces the messages printed by the command shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Rejection {
    /// `initialize` with a non-positive count.
    #[error("Invalid input")]
    InvalidInitialRunwayCount {
        /// Requested count.
        count: i32,
    },
    /// `initialize` on a scheduler that already has runways.
    #[error("Invalid input. {runways} Runways are already available.")]
    AlreadyInitialized {
        /// Runways in the pool.
        runways: u32,
    },
    /// `add_runways` with a non-positive count.
    #[error("Invalid input. Please provide a valid number of runways.")]
    InvalidRunwayCount {
        /// Requested count.
        count: i32,
    },
    /// `submit` with an id already known to the registry.
    #[error("Duplicate FlightID")]
    DuplicateFlight {
        /// Offending id.
        flight: FlightId,
    },
    /// `submit` whose completion time does not fit in [`Time`](crate::models::Time).
    #[error("Invalid input. Flight {flight} would end beyond the supported time range.")]
    TimeOverflow {
        /// Offending id.
        flight: FlightId,
    },
    /// `cancel`/`reprioritize` of an unknown flight.
    #[error("{}", not_found_message(.flight, .action))]
    FlightNotFound {
        /// Requested id.
        flight: FlightId,
        /// Which operation was refused.
        action: Action,
    },
    /// `cancel`/`reprioritize` of a flight that is in progress or completed.
    #[error("{}", departed_message(.flight, .action))]
    AlreadyDeparted {
        /// Requested id.
        flight: FlightId,
        /// Which operation was refused.
        action: Action,
    },
    /// `ground_hold` with `high < low`.
    #[error("Invalid input. Please provide a valid airline range.")]
    InvalidAirlineRange {
        /// Lower bound.
        low: AirlineId,
        /// Upper bound.
        high: AirlineId,
    },
}

/// Operation named in flight-level rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `cancel`.
    Cancel,
    /// `reprioritize`.
    Reprioritize,
}

fn not_found_message(flight: &FlightId, action: &Action) -> String {
    match action {
        Action::Cancel => format!("Flight {flight} does not exist"),
        Action::Reprioritize => format!("Flight {flight} not found"),
    }
}

fn departed_message(flight: &FlightId, action: &Action) -> String {
    match action {
        Action::Cancel => format!("Cannot cancel: Flight {flight} has already departed"),
        Action::Reprioritize => {
            format!("Cannot reprioritize. Flight {flight} has already departed")
        }
    }
}

/// Internal invariant violation. The scheduler state is corrupted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// A heap was empty or a handle was stale where the registry said otherwise.
    #[error("heap invariant violated: {0}")]
    Heap(#[from] HeapError),
    /// The registry and the active set disagree about a flight.
    #[error("registry out of sync for flight {flight}: expected {expected:?}")]
    RegistryDesync {
        /// Flight involved.
        flight: FlightId,
        /// State the operation relied on.
        expected: FlightState,
    },
    /// A timetable entry recorded in the registry is missing from the timetable.
    #[error("timetable entry missing for flight {flight}")]
    MissingTimetableEntry {
        /// Flight involved.
        flight: FlightId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::FlightNotFound { flight: 4, action: Action::Cancel }.to_string(),
            "Flight 4 does not exist"
        );
        assert_eq!(
            Rejection::FlightNotFound { flight: 4, action: Action::Reprioritize }.to_string(),
            "Flight 4 not found"
        );
        assert_eq!(
            Rejection::AlreadyDeparted { flight: 2, action: Action::Cancel }.to_string(),
            "Cannot cancel: Flight 2 has already departed"
        );
        assert_eq!(
            Rejection::AlreadyDeparted { flight: 2, action: Action::Reprioritize }.to_string(),
            "Cannot reprioritize. Flight 2 has already departed"
        );
        assert_eq!(
            Rejection::DuplicateFlight { flight: 1 }.to_string(),
            "Duplicate FlightID"
        );
    }

    #[test]
    fn test_runway_count_messages_differ_by_operation() {
        assert_eq!(
            Rejection::InvalidInitialRunwayCount { count: 0 }.to_string(),
            "Invalid input"
        );
        assert_eq!(
            Rejection::InvalidRunwayCount { count: -1 }.to_string(),
            "Invalid input. Please provide a valid number of runways."
        );
        assert_eq!(
            Rejection::AlreadyInitialized { runways: 3 }.to_string(),
            "Invalid input. 3 Runways are already available."
        );
    }

    #[test]
    fn test_heap_error_converts() {
        let err: SchedulerError = HeapError::Empty { op: "pop_min" }.into();
        assert_eq!(err.to_string(), "heap invariant violated: pop_min on an empty heap");
    }
}
