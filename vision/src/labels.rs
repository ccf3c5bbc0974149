use std::{borrow::Cow, path::Path};

use crate::DetectorError;

const COCO: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck",
    "boat", "traffic light", "fire hydrant", "stop sign", "parking meter", "bench",
    "bird", "cat", "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra",
    "giraffe", "backpack", "umbrella", "handbag", "tie", "suitcase", "frisbee",
    "skis", "snowboard", "sports ball", "kite", "baseball bat", "baseball glove",
    "skateboard", "surfboard", "tennis racket", "bottle", "wine glass", "cup",
    "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich", "orange",
    "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse",
    "remote", "keyboard", "cell phone", "microwave", "oven", "toaster", "sink",
    "refrigerator", "book", "clock", "vase", "scissors", "teddy bear",
    "hair drier", "toothbrush",
];

/// Maps model class ids to canonical lowercase labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    names: Vec<String>,
}

impl LabelMap {
    /// The 80 COCO classes YOLOv8 ships with.
    pub fn coco() -> Self {
        Self {
            names: COCO.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Build a map where the n-th name is class id n.
    pub fn from_names<I, S>(names: I) -> Result<Self, DetectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for (id, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(DetectorError::Labels(format!("class {id} has no name")));
            }
            out.push(name.to_lowercase());
        }
        if out.is_empty() {
            return Err(DetectorError::Labels("no class names".into()));
        }
        Ok(Self { names: out })
    }

    /// Read one name per line. Trailing blank lines are ignored.
    pub fn from_file(path: &Path) -> Result<Self, DetectorError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DetectorError::Labels(format!("{}: {e}", path.display())))?;
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        Self::from_names(lines)
    }

    /// Name for `class_id`, or the id itself when the model reports one we don't know.
    pub fn label(&self, class_id: usize) -> Cow<'_, str> {
        match self.names.get(class_id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(class_id.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::coco()
    }
}
