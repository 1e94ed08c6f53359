//! Configuration module for Reelsmith.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, ScriptPrompts};
pub use settings::{
    GeneralSettings, ImageSettings, OpenAISettings, PromptSettings, ScriptSettings, Settings,
    SpeechProvider, SpeechSettings, VideoSettings,
};
