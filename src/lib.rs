pub mod catalog;
pub mod config;
pub mod dance;
pub mod demo;
pub mod session;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use catalog::{AUDIO_EXTENSIONS, CatalogError, CatalogLoadError, ClipCatalog, clip_path};
pub use config::{ConfigError, DEFAULT_CLIP_DIR, QuizConfig};
pub use dance::{DanceType, UnknownDance};
pub use demo::{catalog_or_demo, demo_catalog};
pub use session::{
    AnswerOutcome, RoundRecord, RoundState, Session, SessionError, SessionSummary,
};
