//! Builder for creating DetectionRecord objects from various input formats.

use crate::tracker::{BoundingBox, BoxFormat, ClassLabel, DetectionRecord};

/// Builder for creating `DetectionRecord`s from various box encodings.
///
/// Whatever encoding the box is given in, [`DetectionBuilder::build`] emits
/// it in the configured [`BoxFormat`] (TLWH unless changed).
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    score: f32,
    class_label: ClassLabel,
    format: BoxFormat,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn class(mut self, class_label: impl Into<ClassLabel>) -> Self {
        self.class_label = class_label.into();
        self
    }

    /// Encoding of the box in the built record.
    pub fn format(mut self, format: BoxFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the final `DetectionRecord`.
    pub fn build(self) -> DetectionRecord {
        let bbox = match self.format {
            BoxFormat::Tlbr => BoundingBox::new(self.x1, self.y1, self.x2, self.y2),
            BoxFormat::Tlwh => {
                BoundingBox::new(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1)
            }
        };
        DetectionRecord::new(bbox, self.score).with_class(self.class_label)
    }
}
