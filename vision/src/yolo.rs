use image::imageops::{self, FilterType};
use opencv::{
    core::{Mat, Scalar},
    dnn,
    prelude::*,
};
use sensor::Frame;
use tracing::{debug, info};

use crate::{decode, Detector, DetectorError, LabelMap, ModelSpec, Observation};

fn cv(e: opencv::Error) -> DetectorError {
    DetectorError::Inference(e.to_string())
}

/// YOLOv8 ONNX export run through OpenCV's DNN module.
pub struct YoloDetector {
    net: dnn::Net,
    labels: LabelMap,
    input_size: u32,
    floor: f32,
}

impl YoloDetector {
    /// Read the network and check it against the label map with one warm-up pass.
    pub fn load(spec: &ModelSpec) -> Result<Self, DetectorError> {
        let path = spec
            .path
            .to_str()
            .ok_or_else(|| DetectorError::ModelLoad("model path is not valid UTF-8".into()))?;
        let net = dnn::read_net_from_onnx(path)
            .map_err(|e| DetectorError::ModelLoad(format!("{path}: {e}")))?;
        let mut detector = Self {
            net,
            labels: spec.labels.clone(),
            input_size: spec.input_size,
            floor: spec.score_floor,
        };

        let warmup = Frame::blank(spec.input_size, spec.input_size);
        let (output, anchors) = detector
            .forward(&warmup)
            .map_err(|e| DetectorError::ModelLoad(format!("{path}: warm-up failed: {e}")))?;
        let classes = decode::class_count(output.len(), anchors)
            .map_err(|e| DetectorError::ModelLoad(format!("{path}: {e}")))?;
        if classes != detector.labels.len() {
            return Err(DetectorError::ModelLoad(format!(
                "{path}: model predicts {classes} classes but the label map has {}",
                detector.labels.len()
            )));
        }
        info!(model = path, classes, anchors, "detector loaded");
        Ok(detector)
    }

    /// Run the network, returning the flat output and its anchor count.
    fn forward(&mut self, frame: &Frame) -> Result<(Vec<f32>, usize), DetectorError> {
        let size = self.input_size;
        let resized = imageops::resize(&frame.image, size, size, FilterType::Triangle);
        let plane = (size * size) as usize;
        let mut chw = vec![0f32; 3 * plane];
        for (i, px) in resized.pixels().enumerate() {
            for c in 0..3 {
                chw[c * plane + i] = f32::from(px[c]) / 255.0;
            }
        }

        let flat = Mat::from_slice(&chw).map_err(cv)?;
        let blob = flat
            .reshape_nd(1, &[1, 3, size as i32, size as i32])
            .map_err(cv)?
            .try_clone()
            .map_err(cv)?;
        self.net
            .set_input(&blob, "", 1.0, Scalar::default())
            .map_err(cv)?;
        let output = self.net.forward_single("").map_err(cv)?;

        let dims = output.mat_size();
        let anchors = match dims.last() {
            Some(&n) if n > 0 => n as usize,
            _ => return Err(DetectorError::Inference("empty output tensor".into())),
        };
        let values = output.data_typed::<f32>().map_err(cv)?.to_vec();
        debug!(dims = ?&*dims, "forward pass");
        Ok((values, anchors))
    }
}

impl Detector for YoloDetector {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<Observation>, DetectorError> {
        let (output, anchors) = self.forward(frame)?;
        decode::decode(&output, anchors, &self.labels, self.floor)
    }
}
