use std::path::PathBuf;

use thiserror::Error;

use crate::models::Notice;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog record at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate opportunity id {0:?}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
    #[error("speech recognition is not available on this host")]
    Unavailable,
    #[error("speech recognition failed: {0}")]
    Recognition(String),
    #[error("no speech detected")]
    NoSpeech,
    #[error("timed out waiting for speech")]
    TimedOut,
}

impl VoiceError {
    pub fn notice(&self) -> Notice {
        match self {
            VoiceError::Unavailable => Notice::destructive(
                "Voice Recognition Not Supported",
                "Voice recognition is not supported here. Please use a host with speech input.",
            ),
            VoiceError::Recognition(_) | VoiceError::NoSpeech | VoiceError::TimedOut => {
                Notice::destructive(
                    "Voice Recognition Error",
                    "Sorry, there was an error with voice recognition. Please try again.",
                )
            }
        }
    }
}
