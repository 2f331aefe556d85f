//! Read-only query results.

use std::fmt;

use crate::models::{FlightId, Time};

/// Flights whose ETA falls in a window, ordered by `(eta, flight)`.
///
/// Produced by [`SlotScheduler::scheduled_between`](super::SlotScheduler::scheduled_between).
/// Holds only ids and may be iterated any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledWindow {
    from: Time,
    to: Time,
    flights: Vec<FlightId>,
}

impl ScheduledWindow {
    pub(crate) fn new(from: Time, to: Time, flights: Vec<FlightId>) -> Self {
        Self { from, to, flights }
    }

    /// Window bounds `(from, to)`, both inclusive.
    pub fn bounds(&self) -> (Time, Time) {
        (self.from, self.to)
    }

    /// Iterates flight ids in ETA order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, FlightId>> {
        self.flights.iter().copied()
    }

    /// Number of flights in the window.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether no flight matched.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The ids as a vector.
    pub fn to_vec(&self) -> Vec<FlightId> {
        self.flights.clone()
    }
}

impl<'a> IntoIterator for &'a ScheduledWindow {
    type Item = FlightId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, FlightId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ScheduledWindow {
    type Item = FlightId;
    type IntoIter = std::vec::IntoIter<FlightId>;

    fn into_iter(self) -> Self::IntoIter {
        self.flights.into_iter()
    }
}

impl fmt::Display for ScheduledWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flights.is_empty() {
            return writeln!(f, "There are no flights in that time period");
        }
        for flight in &self.flights {
            writeln!(f, "[{flight}]")?;
        }
        Ok(())
    }
}
