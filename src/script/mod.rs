//! Narration script generation.

mod openai;

pub use openai::OpenAIScriptWriter;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for narration script generators.
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    /// Write a short narration script about a topic.
    async fn write_script(&self, topic: &str) -> Result<String>;
}
