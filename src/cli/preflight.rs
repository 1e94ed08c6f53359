//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and API keys are available before the
//! pipeline starts, so a run does not fail halfway through its first topic.

use crate::config::{Settings, SpeechProvider};
use crate::error::{ReelError, Result};
use std::process::Command;

/// Check everything a pipeline run needs.
pub fn check(settings: &Settings) -> Result<()> {
    if settings.openai_api_key().is_none() {
        return Err(ReelError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...' or add it to .env"
                .to_string(),
        ));
    }

    if settings.pexels_api_key().is_none() {
        return Err(ReelError::Config(
            "PEXELS_KEY not set. Set it with: export PEXELS_KEY='...' or add it to .env"
                .to_string(),
        ));
    }

    check_tool(&settings.video.ffmpeg_binary)?;

    if settings.speech.provider == SpeechProvider::Piper {
        check_tool(&settings.speech.piper_binary)?;
    }

    Ok(())
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash), others use --version
    let version_arg = if name.ends_with("ffmpeg") {
        "-version"
    } else {
        "--version"
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(ReelError::ToolFailed(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReelError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(ReelError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let err = check_tool("reelsmith-definitely-missing-tool").unwrap_err();
        assert!(matches!(err, ReelError::ToolNotFound(name) if name == "reelsmith-definitely-missing-tool"));
    }
}
