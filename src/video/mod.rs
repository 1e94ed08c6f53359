//! Slideshow video assembly.

mod ffmpeg;

pub use ffmpeg::FfmpegAssembler;

use crate::error::{ReelError, Result};
use crate::layout::OutputLayout;
use async_trait::async_trait;
use std::path::PathBuf;

/// Inputs and output of one slideshow encode.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideshowJob {
    /// Images in display order, one per second at the default framerate.
    pub images: Vec<PathBuf>,
    /// Soundtrack.
    pub audio: PathBuf,
    /// Encoded video destination.
    pub output: PathBuf,
}

impl SlideshowJob {
    /// Resolve the conventional artifact paths of a slug.
    pub fn for_slug(layout: &OutputLayout, slug: &str, image_count: usize) -> Self {
        Self {
            images: layout.image_paths(slug, image_count),
            audio: layout.audio_path(slug),
            output: layout.video_path(slug),
        }
    }

    /// Fail with the first expected input that does not exist.
    pub fn check_inputs(&self) -> Result<()> {
        for input in self.images.iter().chain(std::iter::once(&self.audio)) {
            if !input.is_file() {
                return Err(ReelError::MissingInput(input.clone()));
            }
        }
        Ok(())
    }
}

/// Trait for video encoders.
#[async_trait]
pub trait VideoAssembler: Send + Sync {
    /// Encode the slideshow described by `job`, replacing any existing output.
    async fn assemble(&self, job: &SlideshowJob) -> Result<()>;
}
