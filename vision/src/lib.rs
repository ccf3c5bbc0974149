//! Object detection for the spotter.
//!
//! The [`Detector`] trait turns a frame into [`Observation`]s. Class ids are
//! mapped to names through a [`LabelMap`] checked when the model loads. The
//! YOLO backend lives behind the `opencv` feature; [`decode`] holds the
//! backend-independent output parsing.

pub mod decode;
pub mod detector;
pub mod labels;
#[cfg(feature = "opencv")]
pub mod yolo;

pub use detector::{load_detector, Detector, DetectorError, ModelSpec, Observation};
pub use labels::LabelMap;
