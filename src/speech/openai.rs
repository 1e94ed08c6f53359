//! OpenAI speech endpoint synthesizer.

use super::SpeechSynthesizer;
use crate::config::Settings;
use crate::error::{ReelError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_openai::Client;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// Synthesizer backed by the OpenAI speech API.
pub struct OpenAISynthesizer {
    client: Client<OpenAIConfig>,
    model: SpeechModel,
    voice: Voice,
}

impl OpenAISynthesizer {
    /// Create a synthesizer from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = create_client(&settings.openai, None)?;
        Self::with_client(client, &settings.speech.model, &settings.speech.voice)
    }

    /// Create a synthesizer around an existing client.
    ///
    /// Fails if the voice name is not one the API knows.
    pub fn with_client(client: Client<OpenAIConfig>, model: &str, voice: &str) -> Result<Self> {
        let model: SpeechModel = serde_json::from_value(serde_json::Value::String(model.to_string()))
            .map_err(|e| ReelError::Config(format!("Invalid speech model '{}': {}", model, e)))?;
        let voice: Voice = serde_json::from_value(serde_json::Value::String(voice.to_lowercase()))
            .map_err(|e| ReelError::Config(format!("Invalid speech voice '{}': {}", voice, e)))?;

        Ok(Self {
            client,
            model,
            voice,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISynthesizer {
    #[instrument(skip(self, text), fields(output = %output.display(), chars = text.len()))]
    async fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let request = CreateSpeechRequestArgs::default()
            .model(self.model.clone())
            .input(text)
            .voice(self.voice.clone())
            .response_format(SpeechResponseFormat::Wav)
            .build()
            .map_err(|e| ReelError::Speech(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| ReelError::OpenAI(format!("Speech API error: {}", e)))?;

        tokio::fs::write(output, &response.bytes).await?;

        debug!("Wrote {} bytes of audio", response.bytes.len());
        Ok(())
    }
}
