use std::fs;
use std::path::Path;

use crate::dance::DanceType;

pub const DEFAULT_CLIP_DIR: &str = "audio";

/// Settings shared by the frontends. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Rounds per session, at most one per dance type.
    pub total_rounds: usize,
    /// Directory clip ids are resolved against.
    pub clip_dir: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
    #[error("total_rounds must be between 1 and {max} but was {requested}")]
    InvalidRoundCount { requested: usize, max: usize },
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_rounds: DanceType::ALL.len(),
            clip_dir: DEFAULT_CLIP_DIR.to_string(),
        }
    }
}

impl QuizConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::ParseError {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self =
            serde_json::from_slice(&data).map_err(|source| ConfigError::ParseError {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()
    }

    /// Parses a fetched config document, falling back to the defaults. The
    /// load error is returned for display when the document is rejected.
    pub fn from_json_or_default(document: Option<&str>) -> (Self, Option<String>) {
        let Some(json) = document else {
            return (Self::default(), None);
        };

        match Self::from_json_str(json) {
            Ok(config) => (config, None),
            Err(error) => {
                tracing::warn!(%error, "config document is invalid, using defaults");
                (
                    Self::default(),
                    Some(format!("{}; using default settings", error)),
                )
            }
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        let max = DanceType::ALL.len();
        if self.total_rounds == 0 || self.total_rounds > max {
            return Err(ConfigError::InvalidRoundCount {
                requested: self.total_rounds,
                max,
            });
        }

        Ok(self)
    }
}
