pub mod analysis;
pub mod capture;
pub mod config;
pub mod flow;
pub mod hint;
pub mod normalize;
pub mod ocr;
pub mod recognition;

pub use analysis::AnalysisSession;
pub use capture::{CaptureController, CaptureError, FrameSource, ScreenSource};
pub use config::ConfigManager;
pub use flow::{CaptureFlow, FlowError};
pub use hint::TextHintExtractor;
pub use recognition::{RecognitionClient, RecognitionError, Recognizer};
