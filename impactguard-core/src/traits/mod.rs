//! Extension points
//!
//! - [`link`] - seams between the wireless stack and the processing pipeline
//!
//! Both traits use static dispatch; the wireless stack is generic over its
//! sink so the pipeline can be swapped for a recorder or a test double.

pub mod link;

pub use link::{FragmentSink, LinkEvent, LinkEventSink};
