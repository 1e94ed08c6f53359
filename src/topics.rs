//! Topic list loading.

use crate::error::{ReelError, Result};
use std::path::Path;
use tracing::debug;

/// Read topics from a newline-delimited file.
///
/// Lines are trimmed and blank lines dropped; order is preserved and
/// duplicates are kept.
pub fn read_topics(path: &Path) -> Result<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ReelError::TopicsNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let topics = parse_topics(&content);
    debug!("Read {} topics from {}", topics.len(), path.display());
    Ok(topics)
}

/// Split file content into trimmed, non-empty topic lines.
pub fn parse_topics(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
