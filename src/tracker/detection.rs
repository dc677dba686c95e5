//! Per-frame detector output consumed by the tracker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tracker::bbox::BoundingBox;
use crate::tracker::track::TrackId;

/// Object class reported by a detector.
///
/// Detectors identify classes either by numeric id or by name. `Unknown`
/// (and an empty name) never overwrites a class a track already has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassLabel {
    #[default]
    Unknown,
    Id(u32),
    Name(String),
}

impl ClassLabel {
    /// Whether the label carries an actual class.
    pub fn is_known(&self) -> bool {
        match self {
            ClassLabel::Unknown => false,
            ClassLabel::Id(_) => true,
            ClassLabel::Name(name) => !name.is_empty(),
        }
    }
}

impl From<u32> for ClassLabel {
    fn from(id: u32) -> Self {
        ClassLabel::Id(id)
    }
}

impl From<&str> for ClassLabel {
    fn from(name: &str) -> Self {
        ClassLabel::Name(name.to_owned())
    }
}

impl From<String> for ClassLabel {
    fn from(name: String) -> Self {
        ClassLabel::Name(name)
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Unknown => write!(f, "unknown"),
            ClassLabel::Id(id) => write!(f, "{}", id),
            ClassLabel::Name(name) => write!(f, "{}", name),
        }
    }
}

/// One detected object in one frame.
///
/// `track_id` is ignored on input; the tracker fills it in for every record it
/// accepts and for every held-over prediction it emits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Bounding box, read according to the tracker's `BoxFormat`
    pub bbox: BoundingBox,
    /// Detection confidence score in [0, 1]
    pub confidence: f32,
    pub class_label: ClassLabel,
    pub track_id: Option<TrackId>,
}

impl DetectionRecord {
    pub fn new(bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            bbox,
            confidence,
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class_label: impl Into<ClassLabel>) -> Self {
        self.class_label = class_label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_label_known() {
        assert!(!ClassLabel::Unknown.is_known());
        assert!(!ClassLabel::from("").is_known());
        assert!(ClassLabel::from("car").is_known());
        assert!(ClassLabel::Id(0).is_known());
    }

    #[test]
    fn test_detection_record_defaults() {
        let det =
            DetectionRecord::new(BoundingBox::new(1.0, 2.0, 3.0, 4.0), 0.7).with_class("person");
        assert_eq!(det.track_id, None);
        assert_eq!(det.class_label, ClassLabel::Name("person".into()));
        assert_eq!(det.confidence, 0.7);
        assert_eq!(det.bbox.as_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_class_label_display() {
        assert_eq!(ClassLabel::Id(3).to_string(), "3");
        assert_eq!(ClassLabel::from("bus").to_string(), "bus");
        assert_eq!(ClassLabel::Unknown.to_string(), "unknown");
    }
}
