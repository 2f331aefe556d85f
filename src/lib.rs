//! Discrete-event runway slot scheduler.
//!
//! Assigns flight requests to a pool of identical runways. Each request has
//! a priority and a duration; the scheduler keeps a greedy, non-preemptive
//! plan and re-packs everything that has not started whenever the clock
//! advances or the workload changes.
//!
//! # Modules
//!
//! - **`heap`**: Indexed pairing max-heap with handles, binary min-heap with
//!   delete-by-value
//! - **`models`**: Domain types: `FlightRequest`, `PendingFlight`,
//!   `ActiveFlight`, `TimetableEntry`, `RunwaySlot`, `Schedule`, `Event`
//! - **`scheduler`**: `SlotScheduler` engine, runway pool, registry, queries
//! - **`error`**: Rejections (invalid requests) and scheduler errors
//!   (broken invariants)
//! - **`validation`**: Schedule integrity checks (overlaps, states, runway ids)
//!
//! # Example
//!
//! ```
//! use u_slot::scheduler::SlotScheduler;
//!
//! let mut scheduler = SlotScheduler::new();
//! print!("{}", scheduler.initialize(2));
//!
//! scheduler.submit(1, 10, 0, 5, 8).unwrap();
//! scheduler.submit(2, 20, 0, 7, 6).unwrap();
//! let log = scheduler.submit(3, 10, 0, 9, 4).unwrap();
//! // Both runways are taken from t=0; runway 2 frees first.
//! assert_eq!(log.scheduled(), vec![(3, 10)]);
//!
//! let window = scheduler.scheduled_between(0, 100);
//! assert_eq!(window.to_vec(), vec![3]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Fredman et al. (1986), "The Pairing Heap: A New Form of Self-Adjusting Heap"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 6 (Heapsort)

pub mod error;
pub mod heap;
pub mod models;
pub mod scheduler;
pub mod validation;
