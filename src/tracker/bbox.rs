//! Bounding box geometry and IoU calculations.

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// How the four numbers of a [`BoundingBox`] are interpreted.
///
/// - `Tlwh`: top-left x, top-left y, width, height
/// - `Tlbr`: top-left x, top-left y, bottom-right x, bottom-right y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxFormat {
    #[default]
    Tlwh,
    Tlbr,
}

/// Axis-aligned bounding box.
///
/// The box stores the numbers exactly as the detector produced them; the
/// tracker's [`BoxFormat`] decides how they are read. Boxes handed back as
/// predictions are the very values last seen, without any round trip through
/// another representation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self([a, b, c, d])
    }

    /// Raw values in the order they were given.
    #[inline]
    pub fn as_array(&self) -> [f32; 4] {
        self.0
    }

    /// Convert to TLBR (corner) form: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self, format: BoxFormat) -> [f32; 4] {
        let [a, b, c, d] = self.0;
        match format {
            BoxFormat::Tlbr => [a, b, c, d],
            BoxFormat::Tlwh => [a, b, a + c, b + d],
        }
    }

    /// Area of the box, negative when the corners are inverted.
    #[inline]
    pub fn area(&self, format: BoxFormat) -> f32 {
        let [x1, y1, x2, y2] = self.to_tlbr(format);
        (x2 - x1) * (y2 - y1)
    }

    /// True when none of the coordinates is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(values: [f32; 4]) -> Self {
        Self(values)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({}, {}, {}, {})", a, b, c, d)
    }
}

/// Calculate Intersection over Union (IoU) between two boxes.
///
/// Degenerate boxes (zero or negative area) never overlap anything and
/// yield 0.0.
pub fn iou(a: &BoundingBox, b: &BoundingBox, format: BoxFormat) -> f32 {
    let [ax1, ay1, ax2, ay2] = a.to_tlbr(format);
    let [bx1, by1, bx2, by2] = b.to_tlbr(format);

    let x1 = ax1.max(bx1);
    let y1 = ay1.max(by1);
    let x2 = ax2.min(bx2);
    let y2 = ay2.min(by2);

    if x2 <= x1 || y2 <= y1 {
        return 0.0;
    }

    let inter_area = (x2 - x1) * (y2 - y1);
    let union_area = a.area(format) + b.area(format) - inter_area;

    if union_area > 0.0 {
        (inter_area / union_area).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_matrix(
    boxes_a: &[BoundingBox],
    boxes_b: &[BoundingBox],
    format: BoxFormat,
) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = iou(a, b, format);
        }
    }
    ious
}
