pub mod config;
pub mod photo;
pub mod pill;
pub mod state;

pub use config::AppConfig;
pub use photo::CapturedPhoto;
pub use pill::{Ingredient, PillDetail, RecognitionResult};
pub use state::{RecognitionState, Route};
