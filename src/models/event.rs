//! Scheduler events.
//!
//! Every public operation returns an [`EventLog`]: the ordered list of
//! things that happened (landings, new slots, ETA changes, confirmations,
//! rejections). The set and order of events is part of the scheduler's
//! contract; `Display` renders each event as one line of the operator
//! console output, so a command-line front end can print the log verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AirlineId, FlightId, Priority, Time};
use crate::error::Rejection;

/// Something observable that happened during an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The pool was seeded with `count` runways.
    RunwaysInitialized {
        /// Number of runways created.
        count: i32,
    },
    /// `count` runways were appended to the pool.
    RunwaysAdded {
        /// Number of runways added.
        count: i32,
    },
    /// A flight completed and released its runway.
    Landed {
        /// Flight identifier.
        flight: FlightId,
        /// Completion time (its ETA).
        at: Time,
    },
    /// A flight received its first slot.
    Scheduled {
        /// Flight identifier.
        flight: FlightId,
        /// Estimated completion.
        eta: Time,
    },
    /// Previously scheduled flights whose ETA changed in a re-pack,
    /// sorted by flight id.
    EtasUpdated(Vec<(FlightId, Time)>),
    /// A flight was canceled.
    Canceled {
        /// Flight identifier.
        flight: FlightId,
    },
    /// A flight's priority was changed.
    Reprioritized {
        /// Flight identifier.
        flight: FlightId,
        /// New priority.
        priority: Priority,
    },
    /// All unsatisfied flights of airlines in `[low, high]` were removed.
    GroundHeld {
        /// Lower airline bound (inclusive).
        low: AirlineId,
        /// Upper airline bound (inclusive).
        high: AirlineId,
    },
    /// The operation was refused.
    Rejected(Rejection),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunwaysInitialized { count } => {
                write!(f, "{count} Runways are now available")
            }
            Self::RunwaysAdded { count } => {
                write!(f, "Additional {count} Runways are now available")
            }
            Self::Landed { flight, at } => {
                write!(f, "Flight {flight} has landed at time {at}")
            }
            Self::Scheduled { flight, eta } => {
                write!(f, "Flight {flight} scheduled - ETA: {eta}")
            }
            Self::EtasUpdated(updates) => {
                write!(f, "Updated ETAs: [")?;
                for (i, (flight, eta)) in updates.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{flight}: {eta}")?;
                }
                write!(f, "]")
            }
            Self::Canceled { flight } => write!(f, "Flight {flight} has been canceled"),
            Self::Reprioritized { flight, priority } => {
                write!(f, "Priority of Flight {flight} has been updated to {priority}")
            }
            Self::GroundHeld { low, high } => write!(
                f,
                "Flights of the airlines in the range [{low}, {high}] have been grounded"
            ),
            Self::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

/// Ordered events produced by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    /// Events in emission order.
    pub events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates events in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// The rejection, if the operation was refused.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.events.iter().find_map(|e| match e {
            Event::Rejected(r) => Some(r),
            _ => None,
        })
    }

    /// Whether the operation was refused.
    pub fn is_rejected(&self) -> bool {
        self.rejection().is_some()
    }

    /// Landed flights in report order as `(flight, time)`.
    pub fn landed(&self) -> Vec<(FlightId, Time)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Landed { flight, at } => Some((*flight, *at)),
                _ => None,
            })
            .collect()
    }

    /// Newly scheduled flights in report order as `(flight, eta)`.
    pub fn scheduled(&self) -> Vec<(FlightId, Time)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Scheduled { flight, eta } => Some((*flight, *eta)),
                _ => None,
            })
            .collect()
    }

    /// All ETA updates reported in this log, in report order.
    pub fn updated_etas(&self) -> Vec<(FlightId, Time)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::EtasUpdated(updates) => Some(updates.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Action;

    #[test]
    fn test_event_wording() {
        assert_eq!(
            Event::RunwaysInitialized { count: 3 }.to_string(),
            "3 Runways are now available"
        );
        assert_eq!(
            Event::RunwaysAdded { count: 2 }.to_string(),
            "Additional 2 Runways are now available"
        );
        assert_eq!(
            Event::Landed { flight: 7, at: 12 }.to_string(),
            "Flight 7 has landed at time 12"
        );
        assert_eq!(
            Event::Scheduled { flight: 7, eta: 12 }.to_string(),
            "Flight 7 scheduled - ETA: 12"
        );
        assert_eq!(
            Event::EtasUpdated(vec![(1, 15), (4, 20)]).to_string(),
            "Updated ETAs: [1: 15, 4: 20]"
        );
        assert_eq!(
            Event::Reprioritized { flight: 3, priority: 9 }.to_string(),
            "Priority of Flight 3 has been updated to 9"
        );
        assert_eq!(
            Event::GroundHeld { low: 1, high: 4 }.to_string(),
            "Flights of the airlines in the range [1, 4] have been grounded"
        );
    }

    #[test]
    fn test_log_accessors() {
        let mut log = EventLog::new();
        log.push(Event::Landed { flight: 2, at: 10 });
        log.push(Event::Scheduled { flight: 5, eta: 30 });
        log.push(Event::EtasUpdated(vec![(3, 40)]));
        assert_eq!(log.len(), 3);
        assert_eq!(log.landed(), vec![(2, 10)]);
        assert_eq!(log.scheduled(), vec![(5, 30)]);
        assert_eq!(log.updated_etas(), vec![(3, 40)]);
        assert!(!log.is_rejected());

        log.push(Event::Rejected(Rejection::FlightNotFound {
            flight: 9,
            action: Action::Cancel,
        }));
        assert!(log.is_rejected());
        assert_eq!(
            log.to_string(),
            "Flight 2 has landed at time 10\n\
             Flight 5 scheduled - ETA: 30\n\
             Updated ETAs: [3: 40]\n\
             Flight 9 does not exist\n"
        );
    }

    #[test]
    fn test_log_serde() {
        let mut log = EventLog::new();
        log.push(Event::Canceled { flight: 1 });
        let json = serde_json::to_string(&log).unwrap();
        let back: EventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
