//! Host-level errors.

use std::path::PathBuf;

use laststand_core::config::ConfigError;

use crate::highscores::HighScoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    HighScores(#[from] HighScoreError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(std::io::Error),
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop channel closed")]
    ChannelClosed,
    #[error("shared state lock poisoned")]
    Poisoned,
}
