//! Flight registry and airline index.
//!
//! The registry is the single source of truth for "where is flight X right
//! now". Every other structure (pending queue, timetable) is addressed
//! through the handle or entry stored here, never searched by value.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::SchedulerError;
use crate::heap::Handle;
use crate::models::{AirlineId, FlightId, FlightState, Time, TimetableEntry};

/// Where a flight currently lives.
///
/// Each variant carries exactly the reference that is valid in that state:
/// a queue handle while pending, a timetable entry while holding a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// In the pending queue.
    Queued(Handle),
    /// Holds a slot that has not started.
    Scheduled(TimetableEntry),
    /// Occupying its runway.
    InProgress(TimetableEntry),
    /// Landed.
    Completed,
}

impl Location {
    /// Lifecycle state implied by the location.
    pub fn state(&self) -> FlightState {
        match self {
            Self::Queued(_) => FlightState::Pending,
            Self::Scheduled(_) => FlightState::Scheduled,
            Self::InProgress(_) => FlightState::InProgress,
            Self::Completed => FlightState::Completed,
        }
    }
}

/// Registry record for one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Original submit time (kept for re-queueing).
    pub submit_time: Time,
    /// Current location.
    pub location: Location,
}

/// Map from flight id to its registry record.
///
/// Completed flights stay registered so their ids cannot be reused.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<FlightId, RegistryEntry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered flights (any state).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the id is known in any state.
    pub fn contains(&self, flight: FlightId) -> bool {
        self.entries.contains_key(&flight)
    }

    /// Looks up a flight.
    pub fn get(&self, flight: FlightId) -> Option<&RegistryEntry> {
        self.entries.get(&flight)
    }

    /// Lifecycle state of a flight.
    pub fn state(&self, flight: FlightId) -> Option<FlightState> {
        self.entries.get(&flight).map(|e| e.location.state())
    }

    /// Registers a newly queued flight. Returns `false` if the id exists.
    pub fn admit(&mut self, flight: FlightId, submit_time: Time, handle: Handle) -> bool {
        if self.entries.contains_key(&flight) {
            return false;
        }
        self.entries.insert(
            flight,
            RegistryEntry {
                submit_time,
                location: Location::Queued(handle),
            },
        );
        true
    }

    /// Moves a registered flight to a new location.
    pub fn relocate(&mut self, flight: FlightId, location: Location) -> Result<(), SchedulerError> {
        match self.entries.get_mut(&flight) {
            Some(entry) => {
                entry.location = location;
                Ok(())
            }
            None => Err(SchedulerError::RegistryDesync {
                flight,
                expected: location.state(),
            }),
        }
    }

    /// Forgets a flight entirely (cancellation).
    pub fn remove(&mut self, flight: FlightId) -> Option<RegistryEntry> {
        self.entries.remove(&flight)
    }
}

/// Unsatisfied (pending or scheduled-not-started) flights grouped by airline.
///
/// Holds ids only; ordered so range scans and their results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct AirlineIndex {
    by_airline: BTreeMap<AirlineId, BTreeSet<FlightId>>,
}

impl AirlineIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flight under its airline.
    pub fn insert(&mut self, airline: AirlineId, flight: FlightId) {
        self.by_airline.entry(airline).or_default().insert(flight);
    }

    /// Removes a flight; returns whether it was indexed.
    pub fn remove(&mut self, airline: AirlineId, flight: FlightId) -> bool {
        let Some(flights) = self.by_airline.get_mut(&airline) else {
            return false;
        };
        let removed = flights.remove(&flight);
        if flights.is_empty() {
            self.by_airline.remove(&airline);
        }
        removed
    }

    /// Unsatisfied flights of one airline, ascending.
    pub fn flights(&self, airline: AirlineId) -> Vec<FlightId> {
        self.by_airline
            .get(&airline)
            .map(|flights| flights.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Unsatisfied flights of every airline in `[low, high]` as
    /// `(airline, flight)`, ordered by airline then flight.
    pub fn in_range(&self, low: AirlineId, high: AirlineId) -> Vec<(AirlineId, FlightId)> {
        if high < low {
            return Vec::new();
        }
        self.by_airline
            .range(low..=high)
            .flat_map(|(&airline, flights)| flights.iter().map(move |&f| (airline, f)))
            .collect()
    }

    /// Total indexed flights.
    pub fn len(&self) -> usize {
        self.by_airline.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_airline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::PairingHeap;

    fn handle() -> Handle {
        let mut heap = PairingHeap::new();
        heap.push(0)
    }

    #[test]
    fn test_admit_rejects_duplicates() {
        let mut reg = Registry::new();
        assert!(reg.admit(1, 0, handle()));
        assert!(!reg.admit(1, 5, handle()));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.state(1), Some(FlightState::Pending));
        assert_eq!(reg.get(1).unwrap().submit_time, 0);
    }

    #[test]
    fn test_relocate_and_remove() {
        let mut reg = Registry::new();
        reg.admit(1, 0, handle());
        let entry = TimetableEntry { eta: 10, flight: 1, runway: 1 };
        reg.relocate(1, Location::Scheduled(entry)).unwrap();
        assert_eq!(reg.state(1), Some(FlightState::Scheduled));
        reg.relocate(1, Location::Completed).unwrap();
        assert_eq!(reg.state(1), Some(FlightState::Completed));
        assert!(reg.remove(1).is_some());
        assert!(!reg.contains(1));
    }

    #[test]
    fn test_relocate_unknown_is_desync() {
        let mut reg = Registry::new();
        assert_eq!(
            reg.relocate(9, Location::Completed),
            Err(SchedulerError::RegistryDesync {
                flight: 9,
                expected: FlightState::Completed
            })
        );
    }

    #[test]
    fn test_airline_index_range() {
        let mut idx = AirlineIndex::new();
        idx.insert(1, 10);
        idx.insert(3, 31);
        idx.insert(3, 30);
        idx.insert(7, 70);
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.in_range(2, 7), vec![(3, 30), (3, 31), (7, 70)]);
        assert!(idx.in_range(7, 2).is_empty());
        assert_eq!(idx.flights(3), vec![30, 31]);
    }

    #[test]
    fn test_airline_index_remove_drops_empty_groups() {
        let mut idx = AirlineIndex::new();
        idx.insert(1, 10);
        assert_eq!(idx.flights(1), vec![10]);
        assert!(idx.remove(1, 10));
        assert!(!idx.remove(1, 10));
        assert!(idx.is_empty());
        assert!(idx.flights(1).is_empty());
    }
}
