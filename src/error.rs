//! Error types for the tracker and the detection pipeline.

use thiserror::Error;

use crate::tracker::TrackId;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors reported by [`IouTracker`](crate::tracker::IouTracker).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Frame ids must strictly increase between calls.
    #[error("frame {frame_id} is out of order: previous frame was {previous_frame_id}")]
    OutOfOrderFrame { frame_id: u64, previous_frame_id: u64 },

    /// A detection carries a box that cannot be matched (NaN or infinite coordinates).
    #[error("detection {index} has an unusable bounding box {bbox:?}")]
    InvalidDetectionShape { index: usize, bbox: [f32; 4] },

    /// Settings rejected by [`TrackerConfig::validate`](crate::tracker::TrackerConfig::validate),
    /// or a detector whose box format differs from the tracker's.
    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),

    /// No live track has this id; it expired, was removed, or never existed.
    #[error("track {0} does not exist")]
    UnknownTrack(TrackId),
}

impl TrackerError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Error returned by [`TrackerPipeline`](crate::integration::TrackerPipeline).
#[derive(Error, Debug)]
pub enum PipelineError<E>
where
    E: std::error::Error + 'static,
{
    /// The detector failed; the cause is available through `source()`.
    #[error("detection failed")]
    Detection(#[source] E),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_detection_error_chain() {
        let err: PipelineError<std::io::Error> =
            PipelineError::Detection(std::io::Error::other("camera unplugged"));
        assert_eq!(err.to_string(), "detection failed");
        let source = err.source().expect("detector error is the source");
        assert_eq!(source.to_string(), "camera unplugged");
    }

    #[test]
    fn test_tracker_error_is_transparent() {
        let err: PipelineError<std::io::Error> = TrackerError::UnknownTrack(4).into();
        assert_eq!(err.to_string(), "track 4 does not exist");
        assert_eq!(
            TrackerError::config("bad").to_string(),
            "invalid tracker config: bad"
        );
    }
}
