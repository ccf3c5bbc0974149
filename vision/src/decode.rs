//! Parsing of raw YOLOv8 output tensors.
//!
//! The head emits a `[4 + C, N]` matrix (batch dimension dropped): four box
//! rows followed by one score row per class, one column per anchor.

use crate::{DetectorError, LabelMap, Observation};

/// Reduce a YOLOv8 output to at most one observation per class.
///
/// Each anchor votes for its best-scoring class. Votes below `floor` are
/// dropped and each class keeps its highest vote.
pub fn decode(
    output: &[f32],
    anchors: usize,
    labels: &LabelMap,
    floor: f32,
) -> Result<Vec<Observation>, DetectorError> {
    let classes = class_count(output.len(), anchors)?;
    let mut best = vec![f32::NEG_INFINITY; classes];
    for anchor in 0..anchors {
        let mut top = (0, f32::NEG_INFINITY);
        for class in 0..classes {
            let score = output[(4 + class) * anchors + anchor];
            if score > top.1 {
                top = (class, score);
            }
        }
        let (class, score) = top;
        if score >= floor && score > best[class] {
            best[class] = score;
        }
    }
    Ok(best
        .into_iter()
        .enumerate()
        .filter(|(_, score)| score.is_finite())
        .map(|(class, score)| Observation::new(labels.label(class), score))
        .collect())
}

/// Number of classes in an output of `len` values spread over `anchors` columns.
pub fn class_count(len: usize, anchors: usize) -> Result<usize, DetectorError> {
    if anchors == 0 || len % anchors != 0 || len / anchors <= 4 {
        return Err(DetectorError::Inference(format!(
            "output of {len} values does not fit {anchors} anchors"
        )));
    }
    Ok(len / anchors - 4)
}
