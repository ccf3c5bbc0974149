use clap::Parser;
use sensor::SourceSpec;
use std::{num::NonZeroU64, path::PathBuf, time::Duration};
use vision::{DetectorError, LabelMap, ModelSpec};

use crate::reduce::TargetLabels;

/// Command line and environment options.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Watch a camera for phones and cameras, printing JSON detection events"
)]
pub struct Cli {
    /// Camera device index
    #[arg(long, env = "SPOTTER_DEVICE", default_value_t = 0)]
    pub device: i32,

    /// Replay still images matching this glob instead of opening a camera
    #[arg(long, env = "SPOTTER_REPLAY", value_name = "GLOB")]
    pub replay: Option<String>,

    /// YOLOv8 ONNX model file
    #[arg(long, env = "SPOTTER_MODEL", default_value = "yolov8n.onnx")]
    pub model: PathBuf,

    /// Class names, one per line, in model order (defaults to COCO)
    #[arg(long, env = "SPOTTER_LABELS", value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Minimum confidence for a detection, inclusive
    #[arg(
        long = "conf-threshold",
        visible_alias = "conf",
        env = "SPOTTER_CONF",
        default_value_t = 0.6,
        value_parser = parse_confidence
    )]
    pub conf_threshold: f32,

    /// Run inference on every n-th frame
    #[arg(
        long = "frame-skip",
        visible_alias = "skip",
        env = "SPOTTER_SKIP",
        default_value = "2"
    )]
    pub frame_skip: NonZeroU64,

    /// Label to report; repeat to replace the default phone/camera list
    #[arg(long = "target", value_name = "LABEL")]
    pub targets: Vec<String>,

    /// Pause after a missed read, in milliseconds
    #[arg(long, default_value_t = 50)]
    pub backoff_ms: u64,

    /// Pause after each processed frame, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub idle_ms: u64,

    /// Give up after this many consecutive read errors (0 retries forever)
    #[arg(long, default_value_t = 0)]
    pub max_read_failures: u32,

    /// Print "Phone detected" / "Camera detected" after each event
    #[arg(long)]
    pub announce: bool,
}

fn parse_confidence(raw: &str) -> Result<f32, String> {
    let value: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{raw} is not within 0..=1"))
    }
}

impl Cli {
    pub fn source_spec(&self) -> SourceSpec {
        match &self.replay {
            Some(pattern) => SourceSpec::Replay(pattern.clone()),
            None => SourceSpec::Device(self.device),
        }
    }

    pub fn model_spec(&self) -> Result<ModelSpec, DetectorError> {
        let labels = match &self.labels {
            Some(path) => LabelMap::from_file(path)?,
            None => LabelMap::coco(),
        };
        Ok(ModelSpec::new(&self.model, labels))
    }

    pub fn loop_config(&self) -> LoopConfig {
        let targets = if self.targets.is_empty() {
            TargetLabels::default()
        } else {
            TargetLabels::new(&self.targets)
        };
        LoopConfig {
            source: self.source_spec(),
            confidence_threshold: self.conf_threshold,
            frame_skip: self.frame_skip,
            targets,
            backoff: Duration::from_millis(self.backoff_ms),
            idle: Duration::from_millis(self.idle_ms),
            max_read_failures: self.max_read_failures,
        }
    }
}

/// Settings the sampling loop runs with. Fixed once the loop starts.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopConfig {
    /// Camera index or replay pattern to read from.
    pub source: SourceSpec,
    pub confidence_threshold: f32,
    /// Only every `frame_skip`-th frame reaches the detector.
    pub frame_skip: NonZeroU64,
    pub targets: TargetLabels,
    /// Sleep after a missed or failed read.
    pub backoff: Duration,
    /// Sleep after each processed frame.
    pub idle: Duration,
    /// Consecutive read errors tolerated before giving up; 0 means never.
    pub max_read_failures: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            source: SourceSpec::Device(0),
            confidence_threshold: 0.6,
            frame_skip: NonZeroU64::new(2).unwrap_or(NonZeroU64::MIN),
            targets: TargetLabels::default(),
            backoff: Duration::from_millis(50),
            idle: Duration::from_millis(10),
            max_read_failures: 0,
        }
    }
}
