//! Reelsmith - topics in, narrated slideshow videos out
//!
//! A batch CLI tool that turns a list of topics into short videos.
//!
//! # Overview
//!
//! For every topic in the topics file, Reelsmith:
//! - Writes a short narration script with an OpenAI chat model
//! - Voices the script (OpenAI speech or a local Piper voice)
//! - Downloads three landscape stock photos from Pexels
//! - Encodes the photos as a one-image-per-second slideshow over the narration with ffmpeg
//!
//! Topics are processed one at a time, in file order.
//!
//! # Architecture
//!
//! - `config` - Configuration management and prompt templates
//! - `topics` - Topic list loading
//! - `slug` - Topic to file-name-safe slug conversion
//! - `layout` - Output directory layout
//! - `script` - Narration script generation
//! - `speech` - Text-to-speech
//! - `images` - Stock image search and download
//! - `video` - Slideshow encoding
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use reelsmith::config::Settings;
//! use reelsmith::orchestrator::{FailurePolicy, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let topics = vec!["Le café".to_string()];
//!     let summary = orchestrator.run(&topics, FailurePolicy::Abort).await?;
//!     println!("Generated {} videos", summary.completed.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod images;
pub mod layout;
pub mod openai;
pub mod orchestrator;
pub mod script;
pub mod slug;
pub mod speech;
pub mod topics;
pub mod video;

pub use error::{ReelError, Result};
