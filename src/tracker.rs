mod bbox;
mod detection;
mod iou_tracker;
mod matching;
mod predictor;
mod track;
mod track_state;

pub use bbox::{BoundingBox, BoxFormat, iou, iou_matrix};
pub use detection::{ClassLabel, DetectionRecord};
pub use iou_tracker::{FrameTracks, IouTracker, TrackerConfig};
pub use matching::{AssignmentResult, greedy_assignment};
pub use predictor::{LastPositionPredictor, Predictor};
pub use track::{Track, TrackId};
pub use track_state::TrackState;
