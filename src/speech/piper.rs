//! Local Piper TTS synthesizer.

use super::SpeechSynthesizer;
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Synthesizer that pipes text into a Piper process.
///
/// Piper loads the voice model on each invocation; the handle itself only
/// holds the binary and model paths.
pub struct PiperSynthesizer {
    binary: String,
    model: PathBuf,
}

impl PiperSynthesizer {
    pub fn new(binary: &str, model: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for PiperSynthesizer {
    #[instrument(skip(self, text), fields(output = %output.display(), chars = text.len()))]
    async fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let spawned = Command::new(&self.binary)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_file")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReelError::ToolNotFound(self.binary.clone()));
            }
            Err(e) => {
                return Err(ReelError::Speech(format!("{} execution failed: {e}", self.binary)));
            }
        };

        // Feed stdin while stderr is being drained, or a chatty piper can
        // block on a full stderr pipe while we block on a full stdin pipe.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(text.as_bytes()).await?;
                // Closing stdin tells piper the text is complete
                drop(stdin);
            }
            Ok::<_, std::io::Error>(())
        };
        let (fed, out) = tokio::join!(feed, child.wait_with_output());

        let out = out?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(ReelError::Speech(format!("{} failed: {stderr}", self.binary)));
        }
        fed?;

        debug!("Piper wrote {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[cfg(unix)]
    fn fake_piper(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-piper");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_long_text_with_noisy_stderr() {
        let dir = tempfile::tempdir().unwrap();
        // Fill stderr well past the pipe buffer before reading any input,
        // then copy stdin to the --output_file argument.
        let binary = fake_piper(dir.path(), "yes warming-up | head -c 262144 >&2\ncat > \"$4\"");
        let synth = PiperSynthesizer::new(&binary, dir.path().join("voice.onnx"));
        let output = dir.path().join("out.wav");
        let text = "Coffee arrived in Paris in 1669. ".repeat(8192);

        tokio::time::timeout(Duration::from_secs(30), synth.synthesize(&text, &output))
            .await
            .expect("synthesis should not hang")
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_piper(dir.path(), "cat > /dev/null\necho 'voice model not found' >&2\nexit 3");
        let synth = PiperSynthesizer::new(&binary, dir.path().join("voice.onnx"));

        let err = synth
            .synthesize("hello", &dir.path().join("out.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::Speech(msg) if msg.contains("voice model not found")));
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let synth = PiperSynthesizer::new("reelsmith-no-such-piper", dir.path().join("voice.onnx"));

        let err = synth
            .synthesize("hello", &dir.path().join("out.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::ToolNotFound(name) if name == "reelsmith-no-such-piper"));
    }
}
