//! Frame sources for the spotter.
//!
//! A [`FrameSource`] hands out RGB [`Frame`]s one at a time. Sources are
//! opened from a [`SourceSpec`] and wrapped in [`Released`] so the device is
//! let go exactly once, whichever way the caller exits.

#[cfg(feature = "opencv")]
pub mod camera;
pub mod frame;
pub mod replay;
pub mod source;

pub use frame::Frame;
pub use replay::ReplaySource;
pub use source::{open_source, Capture, FrameSource, Released, SourceError, SourceSpec};
