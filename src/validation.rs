//! Integrity checks for schedule snapshots.
//!
//! Verifies that a [`Schedule`] describes a feasible runway plan. Detects:
//! - Flights listed twice (as two slots, or as a slot and pending)
//! - Overlapping slots on one runway
//! - Slots ending before they start
//! - Slots on runways outside the pool
//! - Lifecycle states inconsistent with the snapshot clock
//!
//! Every check runs; all violations are reported together.

use crate::models::{Assignment, FlightState, Schedule, Time};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A flight appears more than once.
    DuplicateFlight,
    /// Two slots on the same runway intersect.
    RunwayOverlap,
    /// A slot's ETA precedes its start.
    InvalidInterval,
    /// A slot references a runway id outside `1..=runway_count`.
    UnknownRunway,
    /// A slot's state contradicts the snapshot time.
    StateMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule snapshot.
///
/// Checks:
/// 1. No flight holds two slots or is both slotted and pending
/// 2. Every slot has `start <= eta`
/// 3. Every runway id is within the pool
/// 4. Slots on one runway are pairwise disjoint (half-open intervals)
/// 5. `Scheduled` slots start no earlier than the snapshot time;
///    `InProgress` slots have started and not yet ended
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for a in &schedule.assignments {
        if !seen.insert(a.flight) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateFlight,
                format!("Flight {} holds more than one slot", a.flight),
            ));
        }
    }
    for flight in &schedule.pending {
        if !seen.insert(*flight) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateFlight,
                format!("Flight {flight} is both pending and slotted"),
            ));
        }
    }

    for a in &schedule.assignments {
        if a.eta < a.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Flight {} ends at {} before starting at {}", a.flight, a.eta, a.start),
            ));
        }
        if a.runway == 0 || a.runway > schedule.runway_count {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRunway,
                format!(
                    "Flight {} uses runway {} (pool has {})",
                    a.flight, a.runway, schedule.runway_count
                ),
            ));
        }
        if let Some(message) = state_mismatch(a, schedule.time) {
            errors.push(ValidationError::new(ValidationErrorKind::StateMismatch, message));
        }
    }

    // Sweep each runway in start order
    for runway in 1..=schedule.runway_count {
        let slots = schedule.assignments_for_runway(runway);
        for pair in slots.windows(2) {
            if pair[0].overlaps(pair[1]) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::RunwayOverlap,
                    format!(
                        "Flights {} and {} overlap on runway {runway}",
                        pair[0].flight, pair[1].flight
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn state_mismatch(a: &Assignment, now: Time) -> Option<String> {
    match a.state {
        FlightState::Scheduled if a.start < now => Some(format!(
            "Flight {} is scheduled at {} but the clock is {now}",
            a.flight, a.start
        )),
        FlightState::InProgress if a.start > now => Some(format!(
            "Flight {} is in progress before its start {}",
            a.flight, a.start
        )),
        FlightState::InProgress if a.eta <= now => Some(format!(
            "Flight {} is still in progress after its ETA {}",
            a.flight, a.eta
        )),
        FlightState::Pending | FlightState::Completed => Some(format!(
            "Flight {} holds a slot in state {:?}",
            a.flight, a.state
        )),
        _ => None,
    }
}
