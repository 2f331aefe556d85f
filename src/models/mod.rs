//! Slot scheduling domain models.
//!
//! Provides the data types shared by the heaps, the scheduler and its
//! callers.
//!
//! # Domain Mappings
//!
//! | u-slot | Air traffic | Compute | Clinic |
//! |--------|-------------|---------|--------|
//! | Flight | Landing request | Batch job | Appointment |
//! | Airline | Carrier | Tenant | Department |
//! | Runway | Runway | Worker slot | Room |
//! | ETA | Touchdown time | Completion time | End of visit |

mod event;
mod flight;
mod runway;
mod schedule;

pub use event::{Event, EventLog};
pub use flight::{
    ActiveFlight, AirlineId, FlightId, FlightRequest, FlightState, PendingFlight, Priority,
    RunwayId, Time, TimetableEntry,
};
pub use runway::RunwaySlot;
pub use schedule::{Assignment, Schedule};
