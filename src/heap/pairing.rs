//! Arena-backed pairing max-heap with stable handles.
//!
//! # Layout
//! Nodes live in a `Vec` and link to each other by index. Each node keeps
//! `child` (leftmost child), `next` (right sibling) and `prev`. For the
//! leftmost child, `prev` points at the *parent*; for every other child it
//! points at the left sibling. Freed slots go on a free list and their
//! generation is bumped, so a [`Handle`] to a removed node is detected as
//! stale instead of aliasing whatever reuses the slot.
//!
//! # Complexity
//!
//! | Operation | Time |
//! |-----------|------|
//! | push | O(1) |
//! | peek_max | O(1) |
//! | pop_max | O(log n) amortized |
//! | remove | O(log n) amortized |
//! | change_key (increase) | O(1) + detach |
//! | change_key (decrease) | remove + push |
//! | find | O(n) |

use super::HeapError;

/// Stable reference to a node in a [`PairingHeap`].
///
/// Valid until the node is popped or removed. `change_key` may return a
/// different handle (a decrease is implemented as remove + push).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

impl Handle {
    /// Error describing this handle as no longer valid.
    pub fn stale(self) -> HeapError {
        HeapError::StaleHandle {
            index: self.index,
            generation: self.generation,
        }
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: Option<T>,
    generation: u32,
    child: Option<usize>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Pairing max-heap: the greatest element by `Ord` is at the root.
///
/// # Example
/// ```
/// use u_slot::heap::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// let a = heap.push(3);
/// heap.push(7);
/// let a = heap.change_key(a, 10).unwrap();
/// assert_eq!(heap.peek_max(), Ok(&10));
/// assert!(heap.remove(a));
/// assert_eq!(heap.pop_max(), Ok(7));
/// assert!(heap.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PairingHeap<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl<T: Ord> PairingHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts a value and returns its handle.
    pub fn push(&mut self, value: T) -> Handle {
        let index = self.alloc(value);
        self.root = Some(match self.root {
            Some(root) => self.link(root, index),
            None => index,
        });
        self.len += 1;
        Handle {
            index,
            generation: self.nodes[index].generation,
        }
    }

    /// Returns the greatest element.
    pub fn peek_max(&self) -> Result<&T, HeapError> {
        match self.root {
            Some(root) => Ok(self.value(root)),
            None => Err(HeapError::Empty { op: "peek_max" }),
        }
    }

    /// Removes and returns the greatest element.
    ///
    /// Children of the root are recombined with the standard two-pass
    /// strategy: pair left to right, then fold right to left.
    pub fn pop_max(&mut self) -> Result<T, HeapError> {
        let root = self.root.ok_or(HeapError::Empty { op: "pop_max" })?;
        let first_child = self.nodes[root].child.take();
        self.root = self.combine_siblings(first_child);
        self.len -= 1;
        Ok(self.release(root))
    }

    /// Looks up the value behind a handle.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if self.is_live(handle) {
            self.nodes[handle.index].value.as_ref()
        } else {
            None
        }
    }

    /// Whether the handle still refers to a live node.
    pub fn contains(&self, handle: Handle) -> bool {
        self.is_live(handle)
    }

    /// Deletes the node behind `handle`.
    ///
    /// Returns `false` if the handle is stale. Deleting the root delegates
    /// to [`pop_max`](Self::pop_max); any other node is spliced out of its
    /// sibling list and its children are re-melded into the heap.
    pub fn remove(&mut self, handle: Handle) -> bool {
        self.take(handle).is_ok()
    }

    /// Removes the node behind `handle` and returns its value.
    pub fn take(&mut self, handle: Handle) -> Result<T, HeapError> {
        if !self.is_live(handle) {
            return Err(handle.stale());
        }
        let index = handle.index;
        if self.root == Some(index) {
            return self.pop_max();
        }

        self.detach(index);
        let first_child = self.nodes[index].child.take();
        if let Some(subtree) = self.combine_siblings(first_child) {
            self.root = Some(match self.root {
                Some(root) => self.link(root, subtree),
                None => subtree,
            });
        }
        self.len -= 1;
        Ok(self.release(index))
    }

    /// Replaces the value behind `handle` and restores heap order.
    ///
    /// - Greater key: the node is detached and melded against the root.
    /// - Smaller key: the node is removed and the new value pushed; the
    ///   returned handle differs from the input.
    /// - Equal key: the value is replaced in place.
    pub fn change_key(&mut self, handle: Handle, value: T) -> Result<Handle, HeapError> {
        if !self.is_live(handle) {
            return Err(handle.stale());
        }
        let index = handle.index;

        if value < *self.value(index) {
            self.take(handle)?;
            return Ok(self.push(value));
        }

        let increased = value > *self.value(index);
        self.nodes[index].value = Some(value);
        if increased && self.root != Some(index) {
            self.detach(index);
            if let Some(root) = self.root {
                self.root = Some(self.link(root, index));
            }
        }
        Ok(handle)
    }

    /// Finds a node holding `value` by walking the whole tree.
    ///
    /// Fallback for callers that did not keep the handle from `push`.
    pub fn find(&self, value: &T) -> Option<Handle> {
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            if self.value(index) == value {
                return Some(Handle {
                    index,
                    generation: self.nodes[index].generation,
                });
            }
            let mut child = self.nodes[index].child;
            while let Some(c) = child {
                stack.push(c);
                child = self.nodes[c].next;
            }
        }
        None
    }

    /// Iterates live values in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.iter().filter_map(|n| n.value.as_ref())
    }

    /// Removes every element. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for index in 0..self.nodes.len() {
            if self.nodes[index].value.is_some() {
                self.release(index);
            }
        }
        self.root = None;
        self.len = 0;
    }

    fn is_live(&self, handle: Handle) -> bool {
        self.nodes
            .get(handle.index)
            .is_some_and(|n| n.generation == handle.generation && n.value.is_some())
    }

    fn value(&self, index: usize) -> &T {
        match &self.nodes[index].value {
            Some(value) => value,
            None => unreachable!("pairing heap link to vacant slot {index}"),
        }
    }

    fn alloc(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(index) => {
                let node = &mut self.nodes[index];
                node.value = Some(value);
                node.child = None;
                node.prev = None;
                node.next = None;
                index
            }
            None => {
                self.nodes.push(Node {
                    value: Some(value),
                    generation: 0,
                    child: None,
                    prev: None,
                    next: None,
                });
                self.nodes.len() - 1
            }
        }
    }

    /// Frees a detached slot and returns its value.
    fn release(&mut self, index: usize) -> T {
        let node = &mut self.nodes[index];
        node.generation = node.generation.wrapping_add(1);
        node.child = None;
        node.prev = None;
        node.next = None;
        let value = node.value.take();
        self.free.push(index);
        match value {
            Some(value) => value,
            None => unreachable!("released vacant pairing heap slot {index}"),
        }
    }

    /// Splices a non-root node (with its subtree) out of its sibling list.
    fn detach(&mut self, index: usize) {
        let next = self.nodes[index].next.take();
        let Some(prev) = self.nodes[index].prev.take() else {
            return;
        };
        if self.nodes[prev].child == Some(index) {
            self.nodes[prev].child = next;
        } else {
            self.nodes[prev].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = Some(prev);
        }
    }

    /// Melds two detached roots; returns the surviving root.
    fn link(&mut self, a: usize, b: usize) -> usize {
        let (winner, loser) = if self.value(a) > self.value(b) {
            (a, b)
        } else {
            (b, a)
        };

        let old_child = self.nodes[winner].child;
        self.nodes[loser].prev = Some(winner);
        self.nodes[loser].next = old_child;
        if let Some(c) = old_child {
            self.nodes[c].prev = Some(loser);
        }
        self.nodes[winner].child = Some(loser);
        self.nodes[winner].prev = None;
        self.nodes[winner].next = None;
        winner
    }

    /// Two-pass merge of a sibling list into a single detached tree.
    fn combine_siblings(&mut self, first: Option<usize>) -> Option<usize> {
        let mut siblings = Vec::new();
        let mut cursor = first;
        while let Some(index) = cursor {
            cursor = self.nodes[index].next.take();
            self.nodes[index].prev = None;
            siblings.push(index);
        }

        let mut paired: Vec<usize> = Vec::with_capacity(siblings.len().div_ceil(2));
        for pair in siblings.chunks(2) {
            match *pair {
                [a, b] => paired.push(self.link(a, b)),
                [a] => paired.push(a),
                _ => {}
            }
        }

        let mut merged = paired.pop()?;
        while let Some(tree) = paired.pop() {
            merged = self.link(tree, merged);
        }
        Some(merged)
    }
}

impl<T: Ord> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Ord>(heap: &mut PairingHeap<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(v) = heap.pop_max() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_pop_order() {
        let mut heap = PairingHeap::new();
        for v in [5, 1, 9, 3, 7, 2, 8] {
            heap.push(v);
        }
        assert_eq!(heap.len(), 7);
        assert_eq!(drain(&mut heap), vec![9, 8, 7, 5, 3, 2, 1]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_is_error() {
        let mut heap: PairingHeap<i32> = PairingHeap::new();
        assert_eq!(heap.peek_max(), Err(HeapError::Empty { op: "peek_max" }));
        assert_eq!(heap.pop_max(), Err(HeapError::Empty { op: "pop_max" }));
    }

    #[test]
    fn test_remove_inner_node() {
        let mut heap = PairingHeap::new();
        let handles: Vec<Handle> = (0..10).map(|v| heap.push(v)).collect();
        heap.pop_max().unwrap(); // forces a multi-level tree
        assert!(heap.remove(handles[4]));
        assert!(heap.remove(handles[7]));
        assert_eq!(drain(&mut heap), vec![8, 6, 5, 3, 2, 1, 0]);
    }

    #[test]
    fn test_remove_root_delegates_to_pop() {
        let mut heap = PairingHeap::new();
        heap.push(1);
        let top = heap.push(10);
        heap.push(4);
        assert!(heap.remove(top));
        assert_eq!(heap.peek_max(), Ok(&4));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_stale_handle() {
        let mut heap = PairingHeap::new();
        let a = heap.push(1);
        assert!(heap.remove(a));
        assert!(!heap.remove(a));
        assert!(heap.get(a).is_none());

        // Slot is recycled; the old handle must not alias the new node.
        let b = heap.push(2);
        assert_ne!(a, b);
        assert!(!heap.contains(a));
        assert_eq!(heap.get(b), Some(&2));
        assert!(matches!(
            heap.change_key(a, 5),
            Err(HeapError::StaleHandle { .. })
        ));
    }

    #[test]
    fn test_increase_key_moves_to_top() {
        let mut heap = PairingHeap::new();
        let handles: Vec<Handle> = (0..8).map(|v| heap.push(v)).collect();
        heap.pop_max().unwrap();
        let h = heap.change_key(handles[2], 100).unwrap();
        assert_eq!(h, handles[2]);
        assert_eq!(heap.peek_max(), Ok(&100));
        assert_eq!(drain(&mut heap), vec![100, 6, 5, 4, 3, 1, 0]);
    }

    #[test]
    fn test_decrease_key_reinserts() {
        let mut heap = PairingHeap::new();
        heap.push(3);
        let top = heap.push(9);
        heap.push(5);
        let h = heap.change_key(top, 1).unwrap();
        assert_eq!(heap.get(h), Some(&1));
        assert_eq!(drain(&mut heap), vec![5, 3, 1]);
    }

    #[test]
    fn test_equal_key_keeps_handle() {
        let mut heap = PairingHeap::new();
        let a = heap.push(4);
        assert_eq!(heap.change_key(a, 4), Ok(a));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_find() {
        let mut heap = PairingHeap::new();
        for v in [4, 8, 15, 16, 23, 42] {
            heap.push(v);
        }
        heap.pop_max().unwrap();
        let h = heap.find(&15).unwrap();
        assert_eq!(heap.get(h), Some(&15));
        assert!(heap.find(&42).is_none());
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut heap = PairingHeap::new();
        let a = heap.push(1);
        heap.push(2);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(!heap.contains(a));
        heap.push(3);
        assert_eq!(heap.iter().count(), 1);
    }

    #[test]
    fn test_interleaved_against_sorted_reference() {
        let mut heap = PairingHeap::new();
        let mut reference: Vec<i64> = Vec::new();
        let mut handles = Vec::new();
        for i in 0..200i64 {
            let v = (i * 7919) % 263;
            handles.push((heap.push(v), v));
            reference.push(v);
            if i % 5 == 4 {
                let top = heap.pop_max().unwrap();
                reference.sort_unstable();
                assert_eq!(Some(top), reference.pop());
            }
        }
        // Re-key a handful of still-live nodes.
        for (h, old) in handles.iter().step_by(11) {
            if let Some(&cur) = heap.get(*h) {
                assert_eq!(cur, *old);
                let new = if old % 2 == 0 { old + 300 } else { old - 300 };
                heap.change_key(*h, new).unwrap();
                let pos = reference.iter().position(|v| v == old).unwrap();
                reference[pos] = new;
            }
        }
        reference.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(drain(&mut heap), reference);
    }
}
