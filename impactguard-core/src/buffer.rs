//! Fixed-Size Circular Buffer
//!
//! ## Overview
//!
//! Ring buffer backing the sample history. Capacity is a const generic, so
//! the memory the pipeline uses is fixed at compile time no matter how long
//! the helmet stays connected.
//!
//! ## Design Rationale
//!
//! ### Why a Circular Buffer?
//!
//! The injury criteria only look back a few seconds, but the sensor streams
//! forever. A ring buffer gives:
//! - O(1) insertion, evicting the oldest entry when full
//! - O(1) access by logical index (0 = oldest)
//! - Zero heap allocations
//!
//! ### Why Not `heapless::Deque`?
//!
//! 1. **Automatic Overwrite**: When full we want to drop old data rather than
//!    return an error to the notification callback.
//!
//! 2. **Logical Indexing**: Window queries binary-search and slice by logical
//!    index; the mapping below keeps that a single modulo.
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<T, 5> after 7 pushes (write_pos = 2):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!              ↑
//!              └── oldest (logical 0), next write
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use impactguard_core::buffer::CircularBuffer;
//!
//! let mut ring: CircularBuffer<u32, 3> = CircularBuffer::new();
//! ring.push(1);
//! ring.push(2);
//! ring.push(3);
//!
//! // Full: the next push evicts the oldest entry
//! assert_eq!(ring.push(4), Some(1));
//! assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! ```

/// Fixed-size circular buffer
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Logical index 0 is the oldest entry, `len - 1` the newest
///
/// ## Thread Safety
///
/// Not thread-safe. The pipeline is driven from a single callback context.
#[derive(Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage; `Option` avoids `MaybeUninit` and unsafe code
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid entries
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds an entry at the logical end
    ///
    /// Returns the evicted oldest entry when the buffer was already full.
    pub fn push(&mut self, item: T) -> Option<T> {
        if N == 0 {
            return Some(item);
        }

        let evicted = if self.len == N {
            self.data[self.write_pos]
        } else {
            None
        };

        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }

        evicted
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Oldest entry
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest entry
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.get(self.len - 1)
    }

    /// Entry by logical index (0 = oldest, len-1 = newest)
    ///
    /// When the buffer is full the oldest entry sits at `write_pos`:
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            front: 0,
            back: self.len,
        }
    }

    /// Iterate over the logical index range `[start, end)`
    pub fn range(&self, start: usize, end: usize) -> CircularBufferIter<'_, T, N> {
        let end = end.min(self.len);
        CircularBufferIter {
            buffer: self,
            front: start.min(end),
            back: end,
        }
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }
}

/// Iterator over buffer contents in logical order
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    front: usize,
    back: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        let item = self.buffer.get(self.front)?;
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> DoubleEndedIterator for CircularBufferIter<'a, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<u32, 5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.last().is_none());
        assert!(buffer.first().is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = CircularBuffer::<(u32, f32), 5>::new();

        assert_eq!(buffer.push((1000, 25.0)), None);
        assert_eq!(buffer.len(), 1);

        let last = buffer.last().unwrap();
        assert_eq!(*last, (1000, 25.0));
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::<u32, 3>::new();

        let evicted: Vec<Option<u32>> = (0..5).map(|i| buffer.push(i)).collect();
        assert_eq!(evicted, vec![None, None, None, Some(0), Some(1)]);

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(buffer.first(), Some(&2));
        assert_eq!(buffer.last(), Some(&4));
    }

    #[test]
    fn range_iteration_after_wrap() {
        let mut buffer = CircularBuffer::<u32, 4>::new();
        for i in 0..6 {
            buffer.push(i);
        }

        // Logical contents [2, 3, 4, 5]
        let middle: Vec<u32> = buffer.range(1, 3).copied().collect();
        assert_eq!(middle, vec![3, 4]);

        let reversed: Vec<u32> = buffer.iter().rev().copied().collect();
        assert_eq!(reversed, vec![5, 4, 3, 2]);

        assert_eq!(buffer.range(3, 99).len(), 1);
        assert_eq!(buffer.range(5, 2).len(), 0);
    }

    #[test]
    fn clear_resets() {
        let mut buffer = CircularBuffer::<u32, 2>::new();
        buffer.push(1);
        buffer.push(2);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.push(7), None);
        assert_eq!(buffer.first(), Some(&7));
    }
}
