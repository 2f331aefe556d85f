//! Binary min-heap with delete-by-value.
//!
//! Backs the runway pool and the completion timetable. Deletion locates the
//! element with a linear scan, swaps it with the last slot and re-sifts the
//! moved element. The populations it serves are bounded by runway count and
//! in-flight request count, so the O(n) scan is not on a hot path.

use super::HeapError;

/// Array-backed binary min-heap (smallest element by `Ord` at the top).
///
/// # Example
/// ```
/// use u_slot::heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.push((10, 2));
/// heap.push((10, 1));
/// heap.push((5, 3));
/// assert!(heap.remove(&(10, 1)));
/// assert_eq!(heap.pop_min(), Ok((5, 3)));
/// assert_eq!(heap.pop_min(), Ok((10, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    data: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inserts a value.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Returns the smallest element.
    pub fn peek_min(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::Empty { op: "peek_min" })
    }

    /// Removes and returns the smallest element.
    pub fn pop_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty { op: "pop_min" });
        }
        let value = self.data.swap_remove(0);
        self.sift_down(0);
        Ok(value)
    }

    /// Removes the first element equal to `value`.
    ///
    /// Returns `false` if no such element exists.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(index) = self.data.iter().position(|v| v == value) else {
            return false;
        };
        self.data.swap_remove(index);
        if index < self.data.len() {
            // The element moved into `index` may belong above or below it.
            let index = self.sift_up(index);
            self.sift_down(index);
        }
        true
    }

    /// Iterates elements in heap (not sorted) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for value in iter {
            heap.push(value);
        }
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Ord>(heap: &mut MinHeap<T>) -> Vec<T> {
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.pop_min().unwrap());
        }
        out
    }

    #[test]
    fn test_pop_order() {
        let mut heap: MinHeap<i32> = [7, 3, 9, 1, 4, 1].into_iter().collect();
        assert_eq!(heap.peek_min(), Ok(&1));
        assert_eq!(drain(&mut heap), vec![1, 1, 3, 4, 7, 9]);
    }

    #[test]
    fn test_empty_is_error() {
        let mut heap: MinHeap<u8> = MinHeap::new();
        assert!(matches!(heap.peek_min(), Err(HeapError::Empty { .. })));
        assert!(matches!(heap.pop_min(), Err(HeapError::Empty { .. })));
    }

    #[test]
    fn test_remove_missing() {
        let mut heap: MinHeap<i32> = [1, 2, 3].into_iter().collect();
        assert!(!heap.remove(&42));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_remove_last_and_only() {
        let mut heap = MinHeap::new();
        heap.push(5);
        assert!(heap.remove(&5));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_remove_needs_sift_up() {
        //        0
        //     10    1
        //   11 12  2  3
        // Removing 11 moves 3 under 10, which must bubble above it.
        let mut heap: MinHeap<i32> = [0, 10, 1, 11, 12, 2, 3].into_iter().collect();
        assert!(heap.remove(&11));
        assert_eq!(drain(&mut heap), vec![0, 1, 2, 3, 10, 12]);
    }

    #[test]
    fn test_tuple_tiebreak() {
        let mut heap = MinHeap::new();
        heap.push((5, 2u32));
        heap.push((5, 1u32));
        heap.push((3, 9u32));
        assert_eq!(drain(&mut heap), vec![(3, 9), (5, 1), (5, 2)]);
    }

    #[test]
    fn test_many_removals_keep_order() {
        let mut heap: MinHeap<i64> = (0..100).map(|i| (i * 37) % 101).collect();
        for v in (0..100).step_by(3) {
            let target = (v * 37) % 101;
            assert!(heap.remove(&target));
        }
        let out = drain(&mut heap);
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(out, sorted);
        assert_eq!(out.len(), 66);
    }
}
