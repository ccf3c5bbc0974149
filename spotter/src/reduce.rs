use std::collections::BTreeSet;
use vision::Observation;

/// Labels that count as a hit, compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetLabels(BTreeSet<String>);

impl TargetLabels {
    pub const DEFAULT: [&'static str; 6] =
        ["cell phone", "cellphone", "phone", "mobile", "camera", "camcorder"];

    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(&label.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for TargetLabels {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

/// Pick the strongest observation that is a target and meets `threshold`.
///
/// The threshold is inclusive. On equal confidence the earlier observation wins.
pub fn select_best<'a>(
    observations: &'a [Observation],
    targets: &TargetLabels,
    threshold: f32,
) -> Option<&'a Observation> {
    observations
        .iter()
        .filter(|o| o.confidence >= threshold && targets.contains(&o.label))
        .fold(None, |best, o| match best {
            Some(b) if b.confidence >= o.confidence => Some(b),
            _ => Some(o),
        })
}

/// Coarse category of a detected label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Phone,
    Camera,
    Other,
}

impl DeviceKind {
    pub fn of(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "cell phone" | "cellphone" | "phone" | "mobile" => Self::Phone,
            "camera" | "camcorder" => Self::Camera,
            _ => Self::Other,
        }
    }

    /// Plain-text line for consumers that don't parse JSON.
    pub fn announcement(self) -> Option<&'static str> {
        match self {
            Self::Phone => Some("Phone detected"),
            Self::Camera => Some("Camera detected"),
            Self::Other => None,
        }
    }
}
