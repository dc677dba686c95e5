//! Greedy IoU multi-object tracking with last-position hold.
//!
//! Detections from each frame are matched to existing tracks by
//! intersection over union, tracks in creation order picking first.
//! Unmatched detections open new tracks, and tracks that lose their
//! detection are reported at their last known position for a bounded
//! number of frames before they expire.
//!
//! ```
//! use iou_tracker_rs::{BoundingBox, BoxFormat, DetectionRecord, IouTracker, TrackerConfig};
//!
//! let config = TrackerConfig {
//!     box_format: BoxFormat::Tlbr,
//!     ..TrackerConfig::default()
//! };
//! let mut tracker: IouTracker = IouTracker::new(config)?;
//!
//! let mut detections = vec![DetectionRecord::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.9)];
//! let frame = tracker.process(0, &mut detections)?;
//! assert_eq!(frame.active[0].track_id, Some(1));
//! # Ok::<(), iou_tracker_rs::TrackerError>(())
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{PipelineError, Result, TrackerError};
pub use integration::{DetectionBuilder, DetectionSource, TrackerPipeline};
pub use tracker::{
    BoundingBox, BoxFormat, ClassLabel, DetectionRecord, FrameTracks, IouTracker,
    LastPositionPredictor, Predictor, Track, TrackId, TrackState, TrackerConfig,
};
