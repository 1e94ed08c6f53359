//! Configuration settings for Reelsmith.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub openai: OpenAISettings,
    pub script: ScriptSettings,
    pub speech: SpeechSettings,
    pub images: ImageSettings,
    pub video: VideoSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Newline-delimited list of topics, relative to the working directory.
    pub topics_file: String,
    /// Root directory for all generated artifacts.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error) used when no `-v` flag is given.
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            topics_file: "topics.txt".to_string(),
            output_dir: "output".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// OpenAI client settings, shared by script generation and speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Alternative API base URL (e.g. a proxy). None uses the official endpoint.
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_seconds: 300,
        }
    }
}

/// Narration script generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Chat model used to write the narration.
    pub model: String,
    /// Requested narration length in seconds.
    pub duration_seconds: u32,
    /// Sampling temperature. None leaves the service default.
    pub temperature: Option<f32>,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            duration_seconds: 45,
            temperature: None,
        }
    }
}

/// Speech synthesis provider type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// OpenAI speech endpoint (default).
    #[default]
    OpenAI,
    /// Local Piper engine run as a subprocess.
    Piper,
}

impl std::str::FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(SpeechProvider::OpenAI),
            "piper" | "local" => Ok(SpeechProvider::Piper),
            _ => Err(format!("Unknown speech provider: {}", s)),
        }
    }
}

impl std::fmt::Display for SpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechProvider::OpenAI => write!(f, "openai"),
            SpeechProvider::Piper => write!(f, "piper"),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Speech provider (openai, piper).
    pub provider: SpeechProvider,
    /// OpenAI speech model.
    pub model: String,
    /// OpenAI voice name.
    pub voice: String,
    /// Piper executable.
    pub piper_binary: String,
    /// Piper voice model (.onnx). Required for the piper provider.
    pub piper_model: Option<String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::OpenAI,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            piper_binary: "piper".to_string(),
            piper_model: None,
        }
    }
}

/// Stock image search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Pexels API base URL.
    pub api_base: String,
    /// Pexels API key. Falls back to the PEXELS_KEY environment variable.
    pub api_key: Option<String>,
    /// Results requested per search.
    pub per_page: usize,
    /// Which `src` rendition to download (landscape, large, original, ...).
    pub variant: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.pexels.com/v1".to_string(),
            api_key: None,
            per_page: crate::layout::IMAGES_PER_TOPIC,
            variant: "landscape".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Video encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// ffmpeg executable.
    pub ffmpeg_binary: String,
    /// Input framerate of the slideshow (images per second).
    pub framerate: u32,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            framerate: 1,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ReelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reelsmith")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded topics file path.
    pub fn topics_file(&self) -> PathBuf {
        Self::expand_path(&self.general.topics_file)
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Resolve the OpenAI API key from the environment.
    pub fn openai_api_key(&self) -> Option<String> {
        non_empty_env("OPENAI_API_KEY")
    }

    /// Resolve the Pexels API key: config value first, then PEXELS_KEY.
    pub fn pexels_api_key(&self) -> Option<String> {
        self.images
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| non_empty_env("PEXELS_KEY"))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.topics_file, "topics.txt");
        assert_eq!(settings.general.output_dir, "output");
        assert_eq!(settings.script.model, "gpt-4");
        assert_eq!(settings.script.duration_seconds, 45);
        assert_eq!(settings.images.per_page, 3);
        assert_eq!(settings.images.variant, "landscape");
        assert_eq!(settings.video.framerate, 1);
        assert_eq!(settings.video.video_codec, "libx264");
        assert_eq!(settings.video.audio_codec, "aac");
        assert_eq!(settings.speech.provider, SpeechProvider::OpenAI);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[speech]\nprovider = \"piper\"\npiper_model = \"en_US-lessac-medium.onnx\"\n\n[general]\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.speech.provider, SpeechProvider::Piper);
        assert_eq!(settings.speech.piper_model.as_deref(), Some("en_US-lessac-medium.onnx"));
        assert_eq!(settings.general.output_dir, "out");
        assert_eq!(settings.general.topics_file, "topics.txt");
        assert_eq!(settings.video.framerate, 1);
    }

    #[test]
    fn test_log_level_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.log_level, "debug");
        assert_eq!(Settings::default().general.log_level, "warn");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.script.duration_seconds, 45);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.script.model = "gpt-4o-mini".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.script.model, "gpt-4o-mini");
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("OpenAI".parse::<SpeechProvider>().unwrap(), SpeechProvider::OpenAI);
        assert_eq!("piper".parse::<SpeechProvider>().unwrap(), SpeechProvider::Piper);
        assert!("coqui".parse::<SpeechProvider>().is_err());
        assert_eq!(SpeechProvider::Piper.to_string(), "piper");
    }

    #[test]
    fn test_configured_pexels_key_wins() {
        let mut settings = Settings::default();
        settings.images.api_key = Some("from-config".to_string());
        assert_eq!(settings.pexels_api_key().as_deref(), Some("from-config"));
    }
}
