use crate::models::pill::RecognitionResult;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Remote recognition failures
///
/// All variants are caught by the analysis session and mapped to a generic
/// user-facing message; the underlying cause is only logged.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
}

/// Seam between the state machine and the remote service
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image_path: &Path) -> Result<RecognitionResult, RecognitionError>;
}

/// HTTP client for the pill recognition server
pub struct RecognitionClient {
    client: reqwest::Client,
    base_url: String,
}

impl RecognitionClient {
    /// Create a new client with a hard request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RecognitionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecognitionError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Recognizer for RecognitionClient {
    /// Upload the file as the `file` multipart part and parse the structured
    /// result. No automatic retries; the user re-triggers analysis.
    async fn recognize(&self, image_path: &Path) -> Result<RecognitionResult, RecognitionError> {
        let bytes = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo.jpg")
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/jpeg")
            .map_err(|e| RecognitionError::Network(format!("failed to build upload part: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/api/v1/pill/recognize", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionError::Network(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RecognitionError::Server(format!(
                "recognition server returned {}: {}",
                status, body
            )));
        }

        response
            .json::<RecognitionResult>()
            .await
            .map_err(|e| RecognitionError::Server(format!("failed to parse response: {}", e)))
    }
}
