//! Stock image retrieval.

mod pexels;

pub use pexels::PexelsImageSource;

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Trait for stock image services.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Search for `query` and download the results into `dir` as
    /// `{slug}_{index}.jpg`, returning the written paths in order.
    ///
    /// Fewer results than requested produce fewer files; that is not an error here.
    async fn fetch_images(&self, query: &str, slug: &str, dir: &Path) -> Result<Vec<PathBuf>>;
}
