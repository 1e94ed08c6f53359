//! Slug command implementation.

use crate::slug::slugify;
use anyhow::Result;

/// Print the slug of a topic.
pub fn run_slug(topic: &str) -> Result<()> {
    let slug = slugify(topic);
    if slug.is_empty() {
        anyhow::bail!("'{}' has no characters usable in a file name", topic);
    }
    println!("{}", slug);
    Ok(())
}
