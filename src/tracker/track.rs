//! Single object track for multi-object tracking.

use crate::tracker::bbox::BoundingBox;
use crate::tracker::detection::{ClassLabel, DetectionRecord};
use crate::tracker::predictor::{LastPositionPredictor, Predictor};
use crate::tracker::track_state::TrackState;

/// Identifier handed out to tracks, starting at 1.
pub type TrackId = u64;

/// Monotonic track id source owned by one tracker.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrackIdGenerator {
    last: TrackId,
}

impl TrackIdGenerator {
    /// Id the next call to `next_id` will return.
    pub(crate) fn peek_next(&self) -> TrackId {
        self.last + 1
    }

    /// Get the next unique track ID.
    pub(crate) fn next_id(&mut self) -> TrackId {
        self.last += 1;
        self.last
    }
}

/// Single object track.
#[derive(Debug, Clone)]
pub struct Track<P = LastPositionPredictor> {
    track_id: TrackId,
    class_label: ClassLabel,
    /// Confidence of the last matched detection
    confidence: f32,
    predictor: P,
}

impl<P: Predictor> Track<P> {
    /// Create a track that has not seen any detection yet.
    pub fn new(track_id: TrackId, predictor: P) -> Self {
        Self {
            track_id,
            class_label: ClassLabel::Unknown,
            confidence: 0.0,
            predictor,
        }
    }

    /// Feed a matched detection to the track.
    ///
    /// Returns `false` when the predictor rejects the position; the track is
    /// then left exactly as it was.
    pub fn update_from_detection(
        &mut self,
        frame_id: u64,
        bbox: BoundingBox,
        class_label: &ClassLabel,
        confidence: f32,
    ) -> bool {
        if !self.predictor.update(frame_id, bbox) {
            return false;
        }

        if class_label.is_known() {
            self.class_label = class_label.clone();
        }
        self.confidence = confidence;
        true
    }

    /// Position for a frame without a matching detection, or `None` once stale.
    pub fn new_position(&mut self, frame_id: u64) -> Option<BoundingBox> {
        self.predictor.predict(frame_id)
    }

    /// Record describing this track at `bbox`.
    pub fn to_record(&self, bbox: BoundingBox) -> DetectionRecord {
        DetectionRecord {
            bbox,
            confidence: self.confidence,
            class_label: self.class_label.clone(),
            track_id: Some(self.track_id),
        }
    }

    pub fn track_id(&self) -> TrackId {
        self.track_id
    }

    pub fn class_label(&self) -> &ClassLabel {
        &self.class_label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.predictor.bounding_box()
    }

    pub fn last_update_frame(&self) -> Option<u64> {
        self.predictor.last_update_frame()
    }

    pub fn state(&self) -> TrackState {
        self.predictor.state()
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(max_gap: u32) -> Track {
        Track::new(7, LastPositionPredictor::new(max_gap))
    }

    #[test]
    fn test_track_id_generator() {
        let mut ids = TrackIdGenerator::default();
        assert_eq!(ids.peek_next(), 1);
        assert_eq!(ids.peek_next(), 1);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_update_sets_metadata() {
        let mut track = track(5);
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(track.update_from_detection(0, bbox, &ClassLabel::from("car"), 0.9));

        assert_eq!(track.track_id(), 7);
        assert_eq!(track.class_label(), &ClassLabel::from("car"));
        assert_eq!(track.confidence(), 0.9);
        assert_eq!(track.bounding_box(), Some(bbox));
        assert_eq!(track.last_update_frame(), Some(0));
        assert_eq!(track.state(), TrackState::Fresh);
    }

    #[test]
    fn test_class_label_is_sticky() {
        let mut track = track(5);
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(track.update_from_detection(0, bbox, &ClassLabel::Id(2), 0.9));
        assert!(track.update_from_detection(1, bbox, &ClassLabel::Unknown, 0.4));
        assert_eq!(track.class_label(), &ClassLabel::Id(2));
        assert_eq!(track.confidence(), 0.4);

        assert!(track.update_from_detection(2, bbox, &ClassLabel::from(""), 0.5));
        assert_eq!(track.class_label(), &ClassLabel::Id(2));

        assert!(track.update_from_detection(3, bbox, &ClassLabel::Id(4), 0.6));
        assert_eq!(track.class_label(), &ClassLabel::Id(4));
    }

    #[test]
    fn test_rejected_update_keeps_metadata() {
        let mut track = track(1);
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(track.update_from_detection(0, bbox, &ClassLabel::Id(1), 0.8));
        assert_eq!(track.new_position(5), None);

        let moved = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        assert!(!track.update_from_detection(2, moved, &ClassLabel::Id(9), 0.1));
        assert_eq!(track.class_label(), &ClassLabel::Id(1));
        assert_eq!(track.confidence(), 0.8);
        assert_eq!(track.bounding_box(), Some(bbox));
        assert_eq!(track.last_update_frame(), Some(0));
    }

    #[test]
    fn test_to_record() {
        let mut track = track(5);
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert!(track.update_from_detection(0, bbox, &ClassLabel::from("dog"), 0.75));

        let held = track.new_position(1).expect("track should still be fresh");
        let record = track.to_record(held);
        assert_eq!(record.track_id, Some(7));
        assert_eq!(record.bbox, bbox);
        assert_eq!(record.confidence, 0.75);
        assert_eq!(record.class_label, ClassLabel::from("dog"));
    }
}
