//! Pill recognition capture pipeline.
//!
//! Binds a frame source, produces orientation-corrected stills, extracts an
//! optional on-device text hint, submits the image to a remote recognition
//! service, and drives the Camera -> Preview -> Result flow around those
//! asynchronous stages.

pub mod models;
pub mod services;

pub use models::{AppConfig, CapturedPhoto, PillDetail, RecognitionResult, RecognitionState, Route};
pub use services::{
    AnalysisSession, CaptureController, CaptureFlow, ConfigManager, RecognitionClient,
    ScreenSource, TextHintExtractor,
};
