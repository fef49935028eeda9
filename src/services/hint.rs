use crate::models::config::HintConfig;
use crate::services::ocr::{HintEngine, TesseractCli};
use image::DynamicImage;
use regex::Regex;
use std::sync::Arc;
use std::sync::OnceLock;

static INLINE_SPACES: OnceLock<Regex> = OnceLock::new();

/// Best-effort on-device text recognition over a normalized still
///
/// The hint is advisory: it only ever feeds the display-name fallback. Any
/// internal failure (no engine, recognizer error, task failure) yields an
/// empty string and a log line; nothing propagates to the caller.
pub struct TextHintExtractor {
    engine: Option<Arc<dyn HintEngine>>,
}

impl TextHintExtractor {
    pub fn new(engine: Option<Arc<dyn HintEngine>>) -> Self {
        Self { engine }
    }

    /// Extractor that always reports an empty hint
    pub fn disabled() -> Self {
        Self { engine: None }
    }

    /// Build from config; a missing engine downgrades to the disabled
    /// extractor instead of failing startup
    pub fn from_config(config: &HintConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        match TesseractCli::new(&config.language) {
            Ok(engine) => Self::new(Some(Arc::new(engine))),
            Err(e) => {
                tracing::warn!(error = %e, "text hint engine unavailable, hints disabled");
                Self::disabled()
            }
        }
    }

    /// Run recognition; resolves with cleaned text or an empty string
    pub async fn extract_hint(&self, image: &DynamicImage) -> String {
        let Some(engine) = &self.engine else {
            tracing::debug!("no hint engine bound, returning empty hint");
            return String::new();
        };

        let engine = Arc::clone(engine);
        let image = image.clone();

        match tokio::task::spawn_blocking(move || engine.recognize(&image)).await {
            Ok(Ok(raw)) => clean_recognized_text(&raw),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "text hint recognition failed");
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "text hint task panicked");
                String::new()
            }
        }
    }
}

/// Normalize recognizer output: trim lines, collapse runs of inline
/// whitespace, drop empty lines
fn clean_recognized_text(raw: &str) -> String {
    let spaces = INLINE_SPACES.get_or_init(|| Regex::new(r"[ \t]+").unwrap());

    raw.lines()
        .map(|line| spaces.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
