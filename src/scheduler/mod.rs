//! Runway slot scheduling engine.
//!
//! Keeps a greedy, non-preemptive assignment of flights to runways and
//! recomputes it every time the clock is advanced.
//!
//! # Components
//!
//! - `SlotScheduler`: the engine and its operations
//! - `RunwayPool`: earliest-available-first runway heap
//! - `Registry` / `AirlineIndex`: flight lookup and per-airline grouping
//! - `ScheduledWindow`: result of a time-window query
//! - `SchedulerConfig`: initial runway count and clock
//!
//! # Algorithm
//!
//! Priority dispatching with list scheduling: the highest-priority pending
//! flight takes the earliest-free runway. Slots that have started are fixed;
//! everything else is re-packed on each advance.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Fredman et al. (1986), "The Pairing Heap: A New Form of Self-Adjusting Heap"

mod config;
mod engine;
mod pool;
mod query;
mod registry;

pub use config::SchedulerConfig;
pub use engine::SlotScheduler;
pub use pool::RunwayPool;
pub use query::ScheduledWindow;
pub use registry::{AirlineIndex, Location, Registry, RegistryEntry};
