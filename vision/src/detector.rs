use sensor::Frame;
use std::path::PathBuf;
use thiserror::Error;

use crate::LabelMap;

/// One detected object within a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Canonical lowercase label.
    pub label: String,
    /// Model score in `0.0..=1.0`.
    pub confidence: f32,
}

impl Observation {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("model load failed: {0}")]
    ModelLoad(String),
    #[error("invalid label map: {0}")]
    Labels(String),
    #[error("inference failed: {0}")]
    Inference(String),
    /// The backend was compiled out.
    #[error("model load failed: {0} needs the `opencv` feature")]
    Unsupported(&'static str),
}

/// Blocking frame to observations inference.
pub trait Detector: Send {
    /// Run the model on `frame`. Order of the result is not meaningful.
    fn infer(&mut self, frame: &Frame) -> Result<Vec<Observation>, DetectorError>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<Observation>, DetectorError> {
        (**self).infer(frame)
    }
}

/// Everything needed to load a model.
#[derive(Clone, Debug)]
pub struct ModelSpec {
    /// Path to an ONNX export.
    pub path: PathBuf,
    pub labels: LabelMap,
    /// Square input edge in pixels.
    pub input_size: u32,
    /// Scores below this are discarded before they reach the caller.
    pub score_floor: f32,
}

impl ModelSpec {
    pub fn new(path: impl Into<PathBuf>, labels: LabelMap) -> Self {
        Self {
            path: path.into(),
            labels,
            input_size: 640,
            score_floor: 0.25,
        }
    }
}

/// Load the detector described by `spec`.
#[cfg(feature = "opencv")]
pub fn load_detector(spec: &ModelSpec) -> Result<Box<dyn Detector>, DetectorError> {
    Ok(Box::new(crate::yolo::YoloDetector::load(spec)?))
}

/// Load the detector described by `spec`.
#[cfg(not(feature = "opencv"))]
pub fn load_detector(spec: &ModelSpec) -> Result<Box<dyn Detector>, DetectorError> {
    tracing::error!(model = %spec.path.display(), "no detection backend compiled in");
    Err(DetectorError::Unsupported("object detection"))
}
