//! Priority-queue substrate.
//!
//! Two heaps back the scheduler:
//!
//! - **`PairingHeap`**: an addressable max-heap. `push` returns a [`Handle`]
//!   that stays valid until the node is removed, so callers can delete or
//!   re-key an arbitrary element without searching for it.
//! - **`MinHeap`**: a plain binary min-heap with delete-by-value. Used where
//!   the population is small (runways, active flights) and a linear scan on
//!   deletion is cheaper than handle bookkeeping.
//!
//! # Failure Model
//! Peeking or popping an empty heap returns [`HeapError::Empty`]. Inside the
//! scheduler this always signals a desynchronized registry, so it is
//! propagated as a hard failure rather than treated as "nothing to do".
//!
//! # References
//! - Fredman, Sedgewick, Sleator & Tarjan (1986), "The Pairing Heap:
//!   A New Form of Self-Adjusting Heap"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 6 (Heapsort)

mod binary;
mod pairing;

pub use binary::MinHeap;
pub use pairing::{Handle, PairingHeap};

/// Errors raised by heap operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// `peek`/`pop` on an empty heap.
    #[error("{op} on an empty heap")]
    Empty {
        /// Name of the rejected operation.
        op: &'static str,
    },
    /// A handle whose node was already removed (or never existed).
    #[error("stale heap handle (slot {index}, generation {generation})")]
    StaleHandle {
        /// Arena slot the handle points at.
        index: usize,
        /// Generation recorded in the handle.
        generation: u32,
    },
}
