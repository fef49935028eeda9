pub mod engine;
pub mod tesseract;

// Re-export main types
pub use engine::HintEngine;
pub use tesseract::TesseractCli;
