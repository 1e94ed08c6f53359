//! Run command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{FailurePolicy, Orchestrator, RunSummary};
use crate::topics::read_topics;
use anyhow::Result;

/// Run the pipeline over every topic in the topics file.
pub async fn run_pipeline(
    topics_file: Option<String>,
    output_dir: Option<String>,
    keep_going: bool,
    mut settings: Settings,
) -> Result<()> {
    if let Some(path) = topics_file {
        settings.general.topics_file = path;
    }
    if let Some(dir) = output_dir {
        settings.general.output_dir = dir;
    }

    let topics_path = settings.topics_file();
    let topics = read_topics(&topics_path)?;
    if topics.is_empty() {
        Output::warning(&format!("No topics found in {}", topics_path.display()));
        return Ok(());
    }

    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'reelsmith doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::info(&format!(
        "Found {} topics in {}",
        topics.len(),
        topics_path.display()
    ));

    let orchestrator = Orchestrator::new(&settings)?;
    let policy = if keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let summary = orchestrator.run(&topics, policy).await?;
    print_summary(&summary);

    if !summary.failed.is_empty() {
        anyhow::bail!("{} of {} topics failed", summary.failed.len(), topics.len());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    Output::header("Summary");
    Output::kv("Completed", &summary.completed.len().to_string());
    Output::kv("Failed", &summary.failed.len().to_string());

    for done in &summary.completed {
        Output::list_item(&format!("{} -> {}", done.topic, done.video_path.display()));
    }
    for failure in &summary.failed {
        Output::error(&format!("{} ({}): {}", failure.topic, failure.slug, failure.error));
    }
}
