//! Output directory layout.
//!
//! Every artifact of a topic lives at a fixed path derived from its slug:
//!
//! ```text
//! <root>/scripts/<slug>.txt
//! <root>/audio/<slug>.wav
//! <root>/images/<slug>_<n>.jpg
//! <root>/video/<slug>.mp4
//! ```

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Number of images fetched and shown per topic.
pub const IMAGES_PER_TOPIC: usize = 3;

const SUBDIRS: [&str; 4] = ["scripts", "audio", "images", "video"];

/// Resolves artifact paths under an output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output root and its subdirectories if absent.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in SUBDIRS {
            std::fs::create_dir_all(self.root.join(dir))?;
        }
        Ok(())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn script_path(&self, slug: &str) -> PathBuf {
        self.root.join("scripts").join(format!("{}.txt", slug))
    }

    pub fn audio_path(&self, slug: &str) -> PathBuf {
        self.root.join("audio").join(format!("{}.wav", slug))
    }

    pub fn image_path(&self, slug: &str, index: usize) -> PathBuf {
        image_path_in(&self.images_dir(), slug, index)
    }

    /// Paths of the image set the video step expects for a slug.
    pub fn image_paths(&self, slug: &str, count: usize) -> Vec<PathBuf> {
        (0..count).map(|i| self.image_path(slug, i)).collect()
    }

    pub fn video_path(&self, slug: &str) -> PathBuf {
        self.root.join("video").join(format!("{}.mp4", slug))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new("output")
    }
}

/// Image file name convention, shared with image sources writing into a directory.
pub fn image_path_in(dir: &Path, slug: &str, index: usize) -> PathBuf {
    dir.join(format!("{}_{}.jpg", slug, index))
}
