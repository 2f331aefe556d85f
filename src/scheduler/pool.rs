//! Runway pool.
//!
//! Holds every runway exactly once, ordered by `(available_at, runway)`.
//! Runway ids are `1..=len` in creation order; the pool only grows.

use std::collections::HashMap;

use crate::heap::{HeapError, MinHeap};
use crate::models::{RunwayId, RunwaySlot, Time};

/// Earliest-available-first runway pool.
#[derive(Debug, Clone, Default)]
pub struct RunwayPool {
    slots: MinHeap<RunwaySlot>,
    count: u32,
}

impl RunwayPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of runways (independent of how many are currently checked out).
    pub fn len(&self) -> u32 {
        self.count
    }

    /// Whether the pool has no runways.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends `count` runways free from `at`; returns the new ids.
    pub fn add(&mut self, count: u32, at: Time) -> std::ops::RangeInclusive<RunwayId> {
        let first = self.count + 1;
        for runway in first..first + count {
            self.slots.push(RunwaySlot::new(runway, at));
        }
        self.count += count;
        first..=self.count
    }

    /// Resets availability: busy runways free at their recorded time, all
    /// others at `now`. The runway count is unchanged.
    pub fn rebuild(&mut self, now: Time, busy_until: &HashMap<RunwayId, Time>) {
        self.slots.clear();
        for runway in 1..=self.count {
            let at = busy_until.get(&runway).copied().unwrap_or(now);
            self.slots.push(RunwaySlot::new(runway, at));
        }
    }

    /// Takes the earliest-available runway (lowest id on ties).
    ///
    /// Must be paired with [`release`](Self::release).
    pub fn acquire(&mut self) -> Result<RunwaySlot, HeapError> {
        self.slots.pop_min()
    }

    /// Returns a runway to the pool, free from `available_at`.
    pub fn release(&mut self, runway: RunwayId, available_at: Time) {
        self.slots.push(RunwaySlot::new(runway, available_at));
    }

    /// Current availability of every runway, in pool order.
    pub fn availability(&self) -> Vec<RunwaySlot> {
        let mut slots: Vec<RunwaySlot> = self.slots.iter().copied().collect();
        slots.sort();
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_numbers_sequentially() {
        let mut pool = RunwayPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.add(2, 0), 1..=2);
        assert_eq!(pool.add(3, 5), 3..=5);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_acquire_earliest_then_lowest_id() {
        let mut pool = RunwayPool::new();
        pool.add(3, 0);
        let a = pool.acquire().unwrap();
        assert_eq!(a, RunwaySlot::new(1, 0));
        pool.release(a.runway, 10);
        assert_eq!(pool.acquire().unwrap(), RunwaySlot::new(2, 0));
        assert_eq!(pool.acquire().unwrap(), RunwaySlot::new(3, 0));
        assert_eq!(pool.acquire().unwrap(), RunwaySlot::new(1, 10));
        assert!(pool.acquire().is_err());
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_rebuild_respects_busy_runways() {
        let mut pool = RunwayPool::new();
        pool.add(3, 0);
        let busy = HashMap::from([(2, 40)]);
        pool.rebuild(25, &busy);
        assert_eq!(
            pool.availability(),
            vec![
                RunwaySlot::new(1, 25),
                RunwaySlot::new(3, 25),
                RunwaySlot::new(2, 40)
            ]
        );
    }
}
