use vision::{decode::decode, DetectorError, LabelMap, Observation};

/// Lay out `[4 + classes, anchors]` with zeroed boxes and the given scores,
/// where `scores[anchor][class]`.
fn tensor(scores: &[Vec<f32>]) -> (Vec<f32>, usize) {
    let anchors = scores.len();
    let classes = scores[0].len();
    let mut out = vec![0.0; (4 + classes) * anchors];
    for (anchor, row) in scores.iter().enumerate() {
        for (class, score) in row.iter().enumerate() {
            out[(4 + class) * anchors + anchor] = *score;
        }
    }
    (out, anchors)
}

fn labels() -> LabelMap {
    LabelMap::from_names(["person", "cell phone", "camera"]).unwrap()
}

#[test]
fn keeps_best_anchor_per_class() {
    let (out, anchors) = tensor(&[
        vec![0.1, 0.7, 0.0],
        vec![0.0, 0.9, 0.2],
        vec![0.8, 0.3, 0.0],
    ]);
    let mut obs = decode(&out, anchors, &labels(), 0.25).unwrap();
    obs.sort_by(|a, b| a.label.cmp(&b.label));
    assert_eq!(
        obs,
        vec![Observation::new("cell phone", 0.9), Observation::new("person", 0.8)]
    );
}

#[test]
fn scores_below_floor_are_dropped() {
    let (out, anchors) = tensor(&[vec![0.1, 0.2, 0.24]]);
    assert!(decode(&out, anchors, &labels(), 0.25).unwrap().is_empty());
}

#[test]
fn anchor_only_votes_for_its_top_class() {
    // camera scores 0.5 but loses to phone on the same anchor
    let (out, anchors) = tensor(&[vec![0.0, 0.6, 0.5]]);
    let obs = decode(&out, anchors, &labels(), 0.25).unwrap();
    assert_eq!(obs, vec![Observation::new("cell phone", 0.6)]);
}

#[test]
fn unknown_class_uses_numeric_label() {
    let short = LabelMap::from_names(["person"]).unwrap();
    let (out, anchors) = tensor(&[vec![0.0, 0.0, 0.95]]);
    let obs = decode(&out, anchors, &short, 0.25).unwrap();
    assert_eq!(obs, vec![Observation::new("2", 0.95)]);
}

#[test]
fn malformed_output_is_an_inference_error() {
    assert!(matches!(
        decode(&[0.0; 10], 3, &labels(), 0.25),
        Err(DetectorError::Inference(_))
    ));
    assert!(decode(&[0.0; 8], 2, &labels(), 0.25).is_err());
    assert!(decode(&[], 0, &labels(), 0.25).is_err());
}
