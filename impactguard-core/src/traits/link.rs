//! Wireless link seams
//!
//! The BLE stack owns the connection and calls into the pipeline from its
//! notification handler. These two traits are the whole surface it needs:
//! one for data, one for connection state.

use crate::errors::FrameResult;

/// Connection state changes reported by the wireless stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Notifications enabled; a fresh session starts
    Subscribed,
    /// Notifications disabled by the peer
    Unsubscribed,
    /// Link lost
    Disconnected,
}

/// Receiver of raw notification payloads
///
/// ## Example Implementation
///
/// ```rust
/// use impactguard_core::traits::FragmentSink;
/// use impactguard_core::FrameResult;
///
/// struct ByteCounter(usize);
///
/// impl FragmentSink for ByteCounter {
///     type Output = usize;
///
///     fn on_fragment(&mut self, fragment: &[u8]) -> FrameResult<usize> {
///         self.0 += fragment.len();
///         Ok(self.0)
///     }
/// }
/// ```
pub trait FragmentSink {
    /// What the sink reports per fragment
    type Output;

    /// Handle one notification payload
    ///
    /// Must not panic on malformed input.
    fn on_fragment(&mut self, fragment: &[u8]) -> FrameResult<Self::Output>;
}

/// Receiver of connection state changes
pub trait LinkEventSink {
    /// Handle one state change
    fn on_link_event(&mut self, event: LinkEvent);
}
