//! Deferred work on a virtual clock
//!
//! Staggered chat appends and the simulated X-ray analysis are expressed as
//! entries on a [`Timeline`]. Nothing here sleeps: callers advance the clock
//! explicitly, either from tests or from an async driver that maps real
//! elapsed time onto it.

pub mod timeline;

pub use timeline::Timeline;
