//! TrackerPipeline for combining detection with tracking.

use crate::error::{PipelineError, Result, TrackerError};
use crate::tracker::{
    BoxFormat, DetectionRecord, FrameTracks, IouTracker, LastPositionPredictor, Predictor,
    TrackerConfig,
};

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
/// Every box returned by [`detect`](DetectionSource::detect) must be encoded
/// as [`box_format`](DetectionSource::box_format) says; [`TrackerPipeline`]
/// refuses to pair a detector with a tracker reading another format.
///
/// # Example
///
/// ```ignore
/// use iou_tracker_rs::{BoxFormat, DetectionRecord, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn box_format(&self) -> BoxFormat {
///         BoxFormat::Tlbr
///     }
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<DetectionRecord>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::error::Error + 'static;

    /// Encoding of the boxes this detector emits.
    fn box_format(&self) -> BoxFormat;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<Vec<DetectionRecord>, Self::Error>;
}

/// A combined tracker that bundles detection inference with the IoU tracker.
///
/// Feeds every frame's detections straight into [`IouTracker::process`];
/// the caller still owns the frame numbering.
pub struct TrackerPipeline<D: DetectionSource, P = LastPositionPredictor> {
    detector: D,
    tracker: IouTracker<P>,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with default tracker settings, reading
    /// boxes in the detector's format.
    pub fn with_default_config(detector: D) -> Result<Self> {
        let config = TrackerConfig {
            box_format: detector.box_format(),
            ..TrackerConfig::default()
        };
        Self::new(detector, IouTracker::new(config)?)
    }
}

impl<D: DetectionSource, P: Predictor> TrackerPipeline<D, P> {
    /// Create a new tracking pipeline around an already configured tracker.
    ///
    /// Fails with [`TrackerError::InvalidConfig`] when the tracker reads boxes
    /// in a different format than the detector emits.
    pub fn new(detector: D, tracker: IouTracker<P>) -> Result<Self> {
        check_box_format(detector.box_format(), tracker.config())?;
        Ok(Self { detector, tracker })
    }

    /// Detect objects in one frame and track them.
    ///
    /// # Arguments
    /// * `frame_id` - Frame number, strictly increasing between calls
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        frame_id: u64,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<FrameTracks, PipelineError<D::Error>> {
        // The detector may have been reconfigured through `detector_mut`.
        check_box_format(self.detector.box_format(), self.tracker.config())?;
        let mut detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        Ok(self.tracker.process(frame_id, &mut detections)?)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &IouTracker<P> {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut IouTracker<P> {
        &mut self.tracker
    }
}

fn check_box_format(detector_format: BoxFormat, config: &TrackerConfig) -> Result<()> {
    if detector_format != config.box_format {
        return Err(TrackerError::config(format!(
            "detector emits {:?} boxes but the tracker reads {:?}",
            detector_format, config.box_format
        )));
    }
    Ok(())
}
