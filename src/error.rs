//! Error types for Reelsmith.

use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for Reelsmith operations.
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Topics file not found: {}", .0.display())]
    TopicsNotFound(PathBuf),

    #[error("Script generation failed: {0}")]
    Script(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Image search failed: {0}")]
    ImageSearch(String),

    #[error("Video assembly failed: {0}")]
    Video(String),

    #[error("Expected input is missing: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Reelsmith operations.
pub type Result<T> = std::result::Result<T, ReelError>;
