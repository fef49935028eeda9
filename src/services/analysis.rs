use crate::models::state::RecognitionState;
use crate::services::recognition::Recognizer;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Fixed user-facing messages; raw failure causes go to the log only
pub const ERROR_FILE_NOT_FOUND: &str = "The photo file could not be found.";
pub const ERROR_ANALYSIS_FAILED: &str = "Something went wrong while analyzing the pill.";

/// State machine for one recognition attempt:
/// Idle -> Loading -> (Success | Error) -> Idle
///
/// The watch channel is the sole channel from the async recognition outcome
/// to observers; this session is its only writer. Each analyze call carries a
/// generation token, and `reset` or a newer call invalidates older in-flight
/// attempts so a late response can never repaint a screen the user has left.
pub struct AnalysisSession {
    tx: watch::Sender<RecognitionState>,
    generation: AtomicU64,
    recognizer: Arc<dyn Recognizer>,
}

impl AnalysisSession {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        let (tx, _rx) = watch::channel(RecognitionState::Idle);
        Self {
            tx,
            generation: AtomicU64::new(0),
            recognizer,
        }
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<RecognitionState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> RecognitionState {
        self.tx.borrow().clone()
    }

    /// Explicit reset to Idle; invalidates any in-flight attempt
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(RecognitionState::Idle);
    }

    /// Run one analysis attempt and return the final published state.
    ///
    /// A missing photo file goes straight to Error without ever entering
    /// Loading. If this attempt is superseded while the remote call is in
    /// flight, its outcome is discarded and the state current at completion
    /// is returned instead.
    pub async fn analyze(&self, photo_path: &Path) -> RecognitionState {
        if !photo_path.exists() {
            tracing::warn!(path = %photo_path.display(), "analysis requested for missing file");
            let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let state = RecognitionState::Error {
                message: ERROR_FILE_NOT_FOUND.to_string(),
            };
            self.publish_if_current(token, state.clone());
            return state;
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish_if_current(token, RecognitionState::Loading);

        let outcome = self.recognizer.recognize(photo_path).await;

        let state = match outcome {
            Ok(result) => RecognitionState::Success { result },
            Err(e) => {
                tracing::error!(error = %e, "pill analysis failed");
                RecognitionState::Error {
                    message: ERROR_ANALYSIS_FAILED.to_string(),
                }
            }
        };

        if self.publish_if_current(token, state.clone()) {
            state
        } else {
            tracing::debug!(path = %photo_path.display(), "discarding superseded recognition outcome");
            self.current()
        }
    }

    /// Publish only while this attempt is still the latest.
    ///
    /// The channel lock serializes the generation check with the write, so an
    /// attempt superseded between claiming its token and publishing can never
    /// overwrite a newer state.
    fn publish_if_current(&self, token: u64, state: RecognitionState) -> bool {
        self.tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != token {
                return false;
            }
            *current = state;
            true
        })
    }
}
