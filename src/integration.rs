//! Integration module for connecting object detection backends with the tracker.
//!
//! Detectors stay outside this crate; this module provides the traits and
//! helpers that let any of them feed [`IouTracker`](crate::tracker::IouTracker).

mod builder;
mod pipeline;

pub use builder::DetectionBuilder;
pub use pipeline::{DetectionSource, TrackerPipeline};
