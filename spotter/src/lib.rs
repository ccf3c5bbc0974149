//! Watches a camera for phones and cameras.
//!
//! [`Sampler`] pulls frames from a [`sensor::FrameSource`], runs every
//! n-th one through a [`vision::Detector`] and writes at most one
//! [`DetectionEvent`] per processed frame to an [`EventSink`] until its
//! [`ShutdownToken`] is tripped.

pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod reduce;
pub mod sampler;
pub mod shutdown;

pub use app::{report_fatal, serve};
pub use config::{Cli, LoopConfig};
pub use event::{DetectionEvent, Event, EventSink, JsonLines};
pub use logging::init_logging;
pub use reduce::{select_best, DeviceKind, TargetLabels};
pub use sampler::{LoopState, RunSummary, Sampler, SamplerError};
pub use shutdown::{listen_for_signals, ShutdownToken};
