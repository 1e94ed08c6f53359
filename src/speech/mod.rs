//! Speech synthesis for narration scripts.
//!
//! A synthesizer is built once per run and reused for every topic.
//!
//! # Providers
//!
//! - **OpenAI** (default): the hosted speech endpoint, WAV output.
//! - **Piper**: a local Piper voice run as a subprocess.

mod openai;
mod piper;

pub use openai::OpenAISynthesizer;
pub use piper::PiperSynthesizer;

use crate::config::{Settings, SpeechProvider};
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Trait for text-to-speech engines.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and write the audio to `output`, replacing any existing file.
    async fn synthesize(&self, text: &str, output: &Path) -> Result<()>;
}

/// Build the synthesizer selected in settings.
pub fn create_synthesizer(settings: &Settings) -> Result<Arc<dyn SpeechSynthesizer>> {
    match settings.speech.provider {
        SpeechProvider::OpenAI => Ok(Arc::new(OpenAISynthesizer::from_settings(settings)?)),
        SpeechProvider::Piper => {
            let model = settings.speech.piper_model.as_deref().ok_or_else(|| {
                ReelError::Config(
                    "speech.piper_model must be set when speech.provider = \"piper\"".to_string(),
                )
            })?;
            Ok(Arc::new(PiperSynthesizer::new(
                &settings.speech.piper_binary,
                Settings::expand_path(model),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piper_requires_model() {
        let mut settings = Settings::default();
        settings.speech.provider = SpeechProvider::Piper;

        let err = create_synthesizer(&settings).err().unwrap();
        assert!(matches!(err, ReelError::Config(_)));

        settings.speech.piper_model = Some("voice.onnx".to_string());
        assert!(create_synthesizer(&settings).is_ok());
    }
}
