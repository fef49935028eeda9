use crate::models::photo::CapturedPhoto;
use crate::models::pill::PillDetail;
use crate::models::state::{RecognitionState, Route};
use crate::services::analysis::AnalysisSession;
use crate::services::capture::{CaptureController, CaptureError};
use crate::services::hint::TextHintExtractor;
use crate::services::normalize::normalize;
use image::DynamicImage;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Navigation-level failures; each leaves the flow in a defined route
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("camera screen is not active")]
    CameraNotActive,
    #[error("no captured photo is being previewed")]
    PreviewNotActive,
    #[error("captured image could not be decoded")]
    DecodeFailed,
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("failed to delete photo: {0}")]
    Cleanup(#[from] io::Error),
}

/// Drives the Camera -> Preview -> Result route sequence
///
/// Sole owner and mutator of the active `Route`. Holds the captured photo for
/// the lifetime of the Preview route, its decoded image for hint extraction,
/// and the per-photo saved flag that guards deletion on retake.
pub struct CaptureFlow {
    route: Route,
    photo: Option<CapturedPhoto>,
    preview_image: Option<DynamicImage>,
    saved: bool,
    capture: CaptureController,
    session: Arc<AnalysisSession>,
    hints: TextHintExtractor,
}

impl CaptureFlow {
    pub fn new(
        capture: CaptureController,
        session: Arc<AnalysisSession>,
        hints: TextHintExtractor,
    ) -> Self {
        Self {
            route: Route::Camera,
            photo: None,
            preview_image: None,
            saved: false,
            capture,
            session,
            hints,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Recognition state channel; the only way analysis outcomes reach
    /// observers
    pub fn session(&self) -> &Arc<AnalysisSession> {
        &self.session
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Photo under preview, including its capture timestamp
    pub fn photo(&self) -> Option<&CapturedPhoto> {
        self.photo.as_ref()
    }

    /// User-facing message when the last analysis attempt failed
    pub fn error_message(&self) -> Option<String> {
        self.session.current().error_message().map(str::to_string)
    }

    /// Camera -> Preview: capture a still and decode it for display.
    ///
    /// Every Preview entry starts the recognition state machine fresh at
    /// Idle. A decode failure still enters Preview; analysis is blocked
    /// until the user retakes.
    pub async fn take_photo(&mut self) -> Result<&Route, FlowError> {
        if !self.route.is_camera() {
            return Err(FlowError::CameraNotActive);
        }

        let photo = self.capture.capture().await?;
        self.session.reset();
        self.saved = false;
        self.preview_image = normalize(&photo.path);
        self.route = Route::Preview {
            photo_path: photo.path.clone(),
        };
        self.photo = Some(photo);
        Ok(&self.route)
    }

    /// Mark the previewed photo as saved; retake will no longer delete it
    pub fn mark_saved(&mut self) -> Result<(), FlowError> {
        if !self.route.is_preview() {
            return Err(FlowError::PreviewNotActive);
        }
        self.saved = true;
        Ok(())
    }

    /// Preview -> Camera.
    ///
    /// The saved flag, not file existence, decides whether deletion is safe.
    /// A deletion failure keeps Preview active; a file that is already gone
    /// just returns to Camera.
    pub async fn retake(&mut self) -> Result<&Route, FlowError> {
        let photo_path = match &self.route {
            Route::Preview { photo_path } => photo_path.clone(),
            _ => return Err(FlowError::PreviewNotActive),
        };

        if !self.saved {
            match tokio::fs::remove_file(&photo_path).await {
                Ok(()) => {
                    tracing::info!(path = %photo_path.display(), "retake: deleted unsaved photo");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!(path = %photo_path.display(), "retake: photo already gone");
                }
                Err(e) => {
                    tracing::error!(path = %photo_path.display(), error = %e, "retake: deletion failed");
                    return Err(FlowError::Cleanup(e));
                }
            }
        }

        self.photo = None;
        self.preview_image = None;
        self.saved = false;
        self.session.reset();
        self.route = Route::Camera;
        Ok(&self.route)
    }

    /// Run one analysis attempt for the previewed photo.
    ///
    /// Hint extraction and remote recognition run concurrently; only the
    /// recognition outcome drives the state machine. On Success the flow
    /// moves to Result with the mapped detail; on Error it stays in Preview
    /// with the message observable through the session.
    pub async fn analyze(&mut self) -> Result<&Route, FlowError> {
        let photo_path = match &self.route {
            Route::Preview { photo_path } => photo_path.clone(),
            _ => return Err(FlowError::PreviewNotActive),
        };

        let (hint, final_state) = {
            let image = self.preview_image.as_ref().ok_or(FlowError::DecodeFailed)?;
            tokio::join!(
                self.hints.extract_hint(image),
                self.session.analyze(&photo_path)
            )
        };

        if let RecognitionState::Success { result } = final_state {
            let hint = (!hint.trim().is_empty()).then_some(hint.as_str());
            let detail = result.to_detail(hint);
            // Success is consumed by navigation; the machine goes back to Idle
            self.session.reset();
            self.photo = None;
            self.preview_image = None;
            self.route = Route::Result { detail };
        }

        Ok(&self.route)
    }

    /// Result is terminal: exiting hands the detail back to the caller and
    /// releases the device binding. A flow abandoned before Result yields
    /// nothing.
    pub fn exit(self) -> Option<PillDetail> {
        match self.route {
            Route::Result { detail } => Some(detail),
            _ => None,
        }
    }
}
