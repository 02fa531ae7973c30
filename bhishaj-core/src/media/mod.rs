//! Media acquisition
//!
//! Pickers hand back attachment references or an explicit cancellation or
//! denial. They never touch the session store; the caller decides whether
//! anything gets sent.

pub mod composer;
pub mod picker;

pub use composer::Composer;
pub use picker::{FsMediaPicker, MediaPicker, MediaRequest, PickOutcome};
