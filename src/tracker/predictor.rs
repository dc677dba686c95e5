//! Position predictors used to bridge frames without detections.

use crate::tracker::bbox::BoundingBox;
use crate::tracker::track_state::TrackState;

/// Predicts where a track is while no detection confirms it.
///
/// The tracker builds one predictor per track through [`Predictor::with_max_gap`],
/// feeds it every matched detection via [`Predictor::update`] and asks it for a
/// position with [`Predictor::predict`] on frames where the track went unmatched.
pub trait Predictor {
    /// Create a predictor that goes stale after `max_gap` frames without updates.
    fn with_max_gap(max_gap: u32) -> Self
    where
        Self: Sized;

    /// Store a detected position. Returns `false` and leaves the predictor
    /// untouched when the update is rejected.
    #[must_use]
    fn update(&mut self, frame_id: u64, bbox: BoundingBox) -> bool;

    /// Position for `frame_id`, or `None` once the predictor is stale.
    fn predict(&mut self, frame_id: u64) -> Option<BoundingBox>;

    fn state(&self) -> TrackState;

    /// Last stored position, regardless of freshness.
    fn bounding_box(&self) -> Option<BoundingBox>;

    /// Frame of the last accepted update.
    fn last_update_frame(&self) -> Option<u64>;
}

/// Holds the last detected position for a bounded number of frames.
#[derive(Debug, Clone, Default)]
pub struct LastPositionPredictor {
    bbox: Option<BoundingBox>,
    last_update_frame: Option<u64>,
    last_predict_frame: Option<u64>,
    max_gap: u32,
}

impl LastPositionPredictor {
    pub fn new(max_gap: u32) -> Self {
        Self {
            max_gap,
            ..Self::default()
        }
    }

    pub fn max_gap(&self) -> u32 {
        self.max_gap
    }
}

impl Predictor for LastPositionPredictor {
    fn with_max_gap(max_gap: u32) -> Self {
        Self::new(max_gap)
    }

    fn update(&mut self, frame_id: u64, bbox: BoundingBox) -> bool {
        // Measured against the predict cursor, not the last update.
        if let Some(predicted) = self.last_predict_frame {
            if predicted.saturating_sub(frame_id) > u64::from(self.max_gap) {
                return false;
            }
        }

        self.bbox = Some(bbox);
        self.last_update_frame = Some(frame_id);
        true
    }

    fn predict(&mut self, frame_id: u64) -> Option<BoundingBox> {
        self.last_predict_frame = Some(frame_id);
        if self.state().is_fresh() {
            self.bbox
        } else {
            None
        }
    }

    fn state(&self) -> TrackState {
        let Some(updated) = self.last_update_frame else {
            return TrackState::Stale;
        };
        let gap = self
            .last_predict_frame
            .map_or(0, |predicted| predicted.abs_diff(updated));
        if gap < u64::from(self.max_gap) {
            TrackState::Fresh
        } else {
            TrackState::Stale
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bbox
    }

    fn last_update_frame(&self) -> Option<u64> {
        self.last_update_frame
    }
}
