//! Main IouTracker algorithm implementation.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::tracker::bbox::{BoundingBox, BoxFormat, iou_matrix};
use crate::tracker::detection::DetectionRecord;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::predictor::{LastPositionPredictor, Predictor};
use crate::tracker::track::{Track, TrackId, TrackIdGenerator};

/// Configuration for the IouTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// IoU a detection must exceed to continue a track.
    pub iou_threshold: f32,
    /// Frames a track is held without detections before it expires.
    pub max_frames_count_no_detections: u32,
    /// How detection boxes are encoded.
    pub box_format: BoxFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            max_frames_count_no_detections: 15,
            box_format: BoxFormat::Tlwh,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(TrackerError::config(format!(
                "iou_threshold must be within [0, 1], got {}",
                self.iou_threshold
            )));
        }
        if self.max_frames_count_no_detections == 0 {
            return Err(TrackerError::config(
                "max_frames_count_no_detections must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Objects alive in one frame and the tracks that expired in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTracks {
    /// Matched and new detections first, then held-over predictions.
    pub active: Vec<DetectionRecord>,
    /// Ids of tracks removed in this frame, in creation order.
    pub removed: Vec<TrackId>,
}

pub struct IouTracker<P = LastPositionPredictor> {
    /// Live tracks in creation order, which is also ascending id order.
    tracks: Vec<Track<P>>,
    track_ids: TrackIdGenerator,
    previous_frame_id: Option<u64>,
    config: TrackerConfig,
}

impl Default for IouTracker {
    fn default() -> Self {
        Self::with_validated_config(TrackerConfig::default())
    }
}

impl<P: Predictor> IouTracker<P> {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_validated_config(config))
    }

    fn with_validated_config(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            track_ids: TrackIdGenerator::default(),
            previous_frame_id: None,
            config,
        }
    }

    /// Assign track ids to `detections` and advance every track to `frame_id`.
    ///
    /// Each accepted detection gets its `track_id` set in place. A detection
    /// that neither continues a track nor is accepted by a new track's
    /// predictor keeps `track_id: None` and is left out of the result. Tracks that
    /// found no detection are reported at their held position until they
    /// have gone `max_frames_count_no_detections` frames without one, at which
    /// point they are dropped and listed in [`FrameTracks::removed`].
    ///
    /// Fails without touching any state if `frame_id` does not exceed the
    /// previous call's, or if a detection has non-finite coordinates.
    pub fn process(
        &mut self,
        frame_id: u64,
        detections: &mut [DetectionRecord],
    ) -> Result<FrameTracks> {
        if let Some(previous_frame_id) = self.previous_frame_id {
            if frame_id <= previous_frame_id {
                return Err(TrackerError::OutOfOrderFrame {
                    frame_id,
                    previous_frame_id,
                });
            }
        }
        let invalid = detections
            .iter()
            .enumerate()
            .find(|(_, d)| !d.bbox.is_finite());
        if let Some((index, det)) = invalid {
            return Err(TrackerError::InvalidDetectionShape {
                index,
                bbox: det.bbox.as_array(),
            });
        }

        // Step 1: Associate detections, spawning tracks for the leftovers
        let mut active = self.associate(frame_id, detections);
        self.previous_frame_id = Some(frame_id);

        // Step 2: Hold over or expire tracks without a detection this frame
        let mut removed = Vec::new();
        for track in self.tracks.iter_mut() {
            if track.last_update_frame() == Some(frame_id) {
                continue;
            }
            match track.new_position(frame_id) {
                Some(bbox) => active.push(track.to_record(bbox)),
                None => removed.push(track.track_id()),
            }
        }

        // Step 3: Drop expired tracks
        if !removed.is_empty() {
            debug!("frame {}: removing tracks {:?}", frame_id, removed);
            self.tracks.retain(|t| removed.binary_search(&t.track_id()).is_err());
        }

        Ok(FrameTracks { active, removed })
    }

    fn associate(
        &mut self,
        frame_id: u64,
        detections: &mut [DetectionRecord],
    ) -> Vec<DetectionRecord> {
        if detections.is_empty() {
            return Vec::new();
        }

        let format = self.config.box_format;
        let track_boxes: Vec<BoundingBox> = self
            .tracks
            .iter()
            .map(|t| t.bounding_box().unwrap_or_default())
            .collect();
        let det_boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
        let ious = iou_matrix(&track_boxes, &det_boxes, format);

        let AssignmentResult {
            matches,
            mut unmatched_detections,
            ..
        } = matching::greedy_assignment(&ious, self.config.iou_threshold);

        let mut active = Vec::with_capacity(detections.len());
        for (itracked, idet) in matches {
            let track = &mut self.tracks[itracked];
            let det = &mut detections[idet];
            if !track.update_from_detection(frame_id, det.bbox, &det.class_label, det.confidence) {
                warn!(
                    "frame {}: track {} rejected detection {} at {}",
                    frame_id,
                    track.track_id(),
                    idet,
                    det.bbox
                );
                unmatched_detections.push(idet);
                continue;
            }
            trace!(
                "frame {}: track {} matched detection {} (iou {:.3})",
                frame_id,
                track.track_id(),
                idet,
                ious[[itracked, idet]]
            );
            det.track_id = Some(track.track_id());
            active.push(det.clone());
        }
        unmatched_detections.sort_unstable();

        // Init new tracks; a detection the fresh predictor refuses stays untracked
        for idet in unmatched_detections {
            let det = &mut detections[idet];
            let mut track = Track::new(
                self.track_ids.peek_next(),
                P::with_max_gap(self.config.max_frames_count_no_detections),
            );
            if !track.update_from_detection(frame_id, det.bbox, &det.class_label, det.confidence) {
                warn!(
                    "frame {}: new track rejected detection {} at {}, leaving it untracked",
                    frame_id, idet, det.bbox
                );
                continue;
            }
            let track_id = self.track_ids.next_id();
            debug!(
                "frame {}: new track {} ({}) at {}",
                frame_id, track_id, det.class_label, det.bbox
            );
            det.track_id = Some(track_id);
            self.tracks.push(track);
            active.push(det.clone());
        }

        active
    }

    /// Live tracks in creation order.
    pub fn tracks(&self) -> &[Track<P>] {
        &self.tracks
    }

    pub fn track(&self, track_id: TrackId) -> Option<&Track<P>> {
        self.position(track_id).map(|idx| &self.tracks[idx])
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Drop a track ahead of its expiry. Its id is never handed out again.
    pub fn remove_track(&mut self, track_id: TrackId) -> Result<Track<P>> {
        let idx = self
            .position(track_id)
            .ok_or(TrackerError::UnknownTrack(track_id))?;
        debug!("removing track {} on request", track_id);
        Ok(self.tracks.remove(idx))
    }

    /// Drop every track. Ids keep counting up and frames must still increase.
    pub fn clear(&mut self) {
        debug!("clearing {} tracks", self.tracks.len());
        self.tracks.clear();
    }

    pub fn previous_frame_id(&self) -> Option<u64> {
        self.previous_frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn position(&self, track_id: TrackId) -> Option<usize> {
        self.tracks
            .binary_search_by_key(&track_id, |t| t.track_id())
            .ok()
    }
}
