use image::DynamicImage;

/// Text recognizer trait - abstraction for different on-device OCR
/// implementations
pub trait HintEngine: Send + Sync {
    /// Recognize text from an image
    fn recognize(&self, image: &DynamicImage) -> Result<String, String>;

    /// Check if the engine is usable on this host
    fn is_available() -> bool
    where
        Self: Sized;
}
