use crate::models::pill::{PillDetail, RecognitionResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome channel for one recognition attempt
///
/// Exactly one value is current at a time; it is the only way the async
/// recognition outcome reaches observers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecognitionState {
    Idle,
    Loading,
    Success { result: RecognitionResult },
    Error { message: String },
}

impl RecognitionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RecognitionState::Loading)
    }

    /// User-facing error message, when in the error state
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RecognitionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Currently displayed screen within the capture flow
///
/// Single source of navigation truth; mutated only by the flow controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Camera,
    Preview { photo_path: PathBuf },
    Result { detail: PillDetail },
}

impl Route {
    pub fn is_camera(&self) -> bool {
        matches!(self, Route::Camera)
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, Route::Preview { .. })
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Route::Result { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_accessors() {
        assert!(RecognitionState::Loading.is_loading());
        assert!(!RecognitionState::Idle.is_loading());

        let err = RecognitionState::Error {
            message: "boom".to_string(),
        };
        assert_eq!(err.error_message(), Some("boom"));
        assert_eq!(RecognitionState::Idle.error_message(), None);
    }

    #[test]
    fn test_route_predicates() {
        assert!(Route::Camera.is_camera());
        let preview = Route::Preview {
            photo_path: PathBuf::from("/tmp/p.jpg"),
        };
        assert!(preview.is_preview());
        assert!(!preview.is_result());
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_string(&RecognitionState::Loading).unwrap();
        assert_eq!(json, r#"{"state":"loading"}"#);
    }
}
