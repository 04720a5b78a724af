//! Bounded, Time-Ordered Sample History
//!
//! ## Overview
//!
//! Every estimated [`Sample`] is appended here. Once the history is full each
//! append evicts exactly the oldest sample, so memory stays fixed however long
//! the subscription runs.
//!
//! ## Ordering Assumption
//!
//! Timestamps are assumed non-decreasing in insertion order. Rows inside one
//! frame are ordered by construction; frames are assumed to arrive in order.
//! Out-of-order or duplicate frames are not detected. Window queries rely on
//! this ordering to locate their bounds by binary search and return a
//! contiguous run of samples.
//!
//! ## Window Queries
//!
//! ```text
//!                    center
//!   ──────[──────────── │ ────────────]──────→ t
//!        c - w                       c + w        Around
//!   ──────[──────────── │ ──────────────────→ t
//!        c - w                                    Before
//!   ─────────────────── │ ────────────]──────→ t
//!                                   c + w         After
//! ```
//!
//! Bounds are inclusive. An empty window is a valid answer.

use crate::{
    buffer::{CircularBuffer, CircularBufferIter},
    constants::buffers::HISTORY_CAPACITY,
    sample::Sample,
    time::{self, Timestamp},
};

/// Which side of the center a window covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowSpan {
    /// `[center - width, center + width]`
    Around,
    /// `[center - width, center]`
    Before,
    /// `[center, center + width]`
    After,
}

impl WindowSpan {
    /// Inclusive `(start, end)` bounds
    pub fn bounds(&self, center: Timestamp, width_ms: u32) -> (Timestamp, Timestamp) {
        match self {
            Self::Around => (
                time::window_start(center, width_ms),
                time::window_end(center, width_ms),
            ),
            Self::Before => (time::window_start(center, width_ms), center),
            Self::After => (center, time::window_end(center, width_ms)),
        }
    }
}

/// Sample history with FIFO eviction
#[derive(Clone)]
pub struct History<const N: usize = HISTORY_CAPACITY> {
    samples: CircularBuffer<Sample, N>,
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> History<N> {
    /// Empty history
    pub const fn new() -> Self {
        Self {
            samples: CircularBuffer::new(),
        }
    }

    /// Append at the logical end, returning the evicted oldest sample if the
    /// history was full
    pub fn append(&mut self, sample: Sample) -> Option<Sample> {
        self.samples.push(sample)
    }

    /// Discard every sample
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples retained
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Maximum number of samples retained
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether the history holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Oldest retained sample
    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Sample by position (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// All samples, oldest first
    pub fn iter(&self) -> CircularBufferIter<'_, Sample, N> {
        self.samples.iter()
    }

    /// Samples matching `predicate`, oldest first
    pub fn snapshot<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Sample> + 'a
    where
        P: FnMut(&Sample) -> bool + 'a,
    {
        self.samples.iter().filter(move |sample| predicate(sample))
    }

    /// First sample stamped exactly `timestamp`
    pub fn find(&self, timestamp: Timestamp) -> Option<&Sample> {
        let index = self.lower_bound(timestamp);
        self.get(index).filter(|sample| sample.timestamp == timestamp)
    }

    /// Samples within `width_ms` of `center` on the given side
    pub fn window(&self, center: Timestamp, width_ms: u32, span: WindowSpan) -> HistoryWindow<'_, N> {
        let (start, end) = span.bounds(center, width_ms);
        self.between(start, end)
    }

    /// Samples with `start <= timestamp <= end`
    pub fn between(&self, start: Timestamp, end: Timestamp) -> HistoryWindow<'_, N> {
        let first = self.lower_bound(start);
        let last = self.upper_bound(end).max(first);
        HistoryWindow {
            samples: &self.samples,
            start: first,
            end: last,
        }
    }

    /// Whole history as a window
    pub fn all(&self) -> HistoryWindow<'_, N> {
        HistoryWindow {
            samples: &self.samples,
            start: 0,
            end: self.len(),
        }
    }

    /// Index of the first sample with `timestamp >= t`
    fn lower_bound(&self, t: Timestamp) -> usize {
        self.partition_point(|sample| sample.timestamp < t)
    }

    /// Index of the first sample with `timestamp > t`
    fn upper_bound(&self, t: Timestamp) -> usize {
        self.partition_point(|sample| sample.timestamp <= t)
    }

    fn partition_point<F: Fn(&Sample) -> bool>(&self, pred: F) -> usize {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.get(mid) {
                Some(sample) if pred(sample) => lo = mid + 1,
                _ => hi = mid,
            }
        }
        lo
    }
}

/// Contiguous run of history samples in timestamp order
#[derive(Clone, Copy)]
pub struct HistoryWindow<'a, const N: usize = HISTORY_CAPACITY> {
    samples: &'a CircularBuffer<Sample, N>,
    start: usize,
    end: usize,
}

impl<'a, const N: usize> HistoryWindow<'a, N> {
    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Sample by position within the window
    pub fn get(&self, index: usize) -> Option<&'a Sample> {
        if index >= self.len() {
            return None;
        }
        self.samples.get(self.start + index)
    }

    /// Earliest sample
    pub fn first(&self) -> Option<&'a Sample> {
        self.get(0)
    }

    /// Latest sample
    pub fn last(&self) -> Option<&'a Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Samples in timestamp order
    pub fn iter(&self) -> CircularBufferIter<'a, Sample, N> {
        self.samples.range(self.start, self.end)
    }

    /// Window restricted to its first `count` samples
    pub fn take(&self, count: usize) -> Self {
        Self {
            samples: self.samples,
            start: self.start,
            end: self.start + count.min(self.len()),
        }
    }
}
