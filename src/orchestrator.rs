//! Pipeline orchestrator for Reelsmith.
//!
//! Runs every topic through script, speech, images and video, one topic at a time.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::{ReelError, Result};
use crate::images::{ImageSource, PexelsImageSource};
use crate::layout::{OutputLayout, IMAGES_PER_TOPIC};
use crate::script::{OpenAIScriptWriter, ScriptWriter};
use crate::slug::slugify;
use crate::speech::{create_synthesizer, SpeechSynthesizer};
use crate::video::{FfmpegAssembler, SlideshowJob, VideoAssembler};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// What to do when a topic fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing topic and return its error.
    #[default]
    Abort,
    /// Record the failure and move on to the next topic.
    Continue,
}

/// The main orchestrator for the Reelsmith pipeline.
pub struct Orchestrator {
    layout: OutputLayout,
    script_writer: Arc<dyn ScriptWriter>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    image_source: Arc<dyn ImageSource>,
    assembler: Arc<dyn VideoAssembler>,
}

impl Orchestrator {
    /// Create an orchestrator with the services configured in `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let script_writer = Arc::new(OpenAIScriptWriter::from_settings(settings, prompts)?);

        info!("Using {} speech synthesis", settings.speech.provider);
        let synthesizer = create_synthesizer(settings)?;

        let image_source = Arc::new(PexelsImageSource::from_settings(settings)?);
        let assembler = Arc::new(FfmpegAssembler::new(&settings.video));

        Self::with_components(
            OutputLayout::new(settings.output_dir()),
            script_writer,
            synthesizer,
            image_source,
            assembler,
        )
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        layout: OutputLayout,
        script_writer: Arc<dyn ScriptWriter>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        image_source: Arc<dyn ImageSource>,
        assembler: Arc<dyn VideoAssembler>,
    ) -> Result<Self> {
        layout.ensure_dirs()?;

        Ok(Self {
            layout,
            script_writer,
            synthesizer,
            image_source,
            assembler,
        })
    }

    /// Get the output layout.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Process topics in order.
    ///
    /// Under [`FailurePolicy::Abort`] the first error is returned and later
    /// topics are left untouched. Artifacts already written for the failing
    /// topic stay on disk either way.
    pub async fn run(&self, topics: &[String], policy: FailurePolicy) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let total = topics.len();

        for (i, topic) in topics.iter().enumerate() {
            Output::info(&format!("[{}/{}] Processing topic: {}", i + 1, total, topic));

            match self.process_topic(topic).await {
                Ok(artifacts) => {
                    Output::success(&format!("Video generated for: {}", topic));
                    summary.completed.push(artifacts);
                }
                Err(e) if policy == FailurePolicy::Continue => {
                    error!("Topic '{}' failed: {}", topic, e);
                    Output::error(&format!("Failed: {}: {}", topic, e));
                    summary.failed.push(TopicFailure {
                        topic: topic.clone(),
                        slug: slugify(topic),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Run one topic through every stage.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn process_topic(&self, topic: &str) -> Result<TopicArtifacts> {
        let slug = slugify(topic);
        if slug.is_empty() {
            return Err(ReelError::InvalidInput(format!(
                "Topic '{}' has no characters usable in a file name",
                topic
            )));
        }
        info!("Slug: {}", slug);

        // Script
        let spinner = Output::spinner("Writing script...");
        let script = self.script_writer.write_script(topic).await;
        spinner.finish_and_clear();
        let script = script?;
        let script_path = self.layout.script_path(&slug);
        tokio::fs::write(&script_path, &script).await?;
        eprintln!("  Script written ({} characters)", script.len());

        // Speech
        let spinner = Output::spinner("Synthesizing speech...");
        let audio_path = self.layout.audio_path(&slug);
        let spoken = self.synthesizer.synthesize(&script, &audio_path).await;
        spinner.finish_and_clear();
        spoken?;
        eprintln!("  Audio synthesized.");

        // Images
        let spinner = Output::spinner("Fetching images...");
        let images = self
            .image_source
            .fetch_images(topic, &slug, &self.layout.images_dir())
            .await;
        spinner.finish_and_clear();
        let image_paths = images?;
        eprintln!("  Downloaded {} images", image_paths.len());
        if image_paths.len() < IMAGES_PER_TOPIC {
            warn!(
                "Only {} of {} images found for '{}'",
                image_paths.len(),
                IMAGES_PER_TOPIC,
                topic
            );
        }

        // Video
        let spinner = Output::spinner("Encoding video...");
        let job = SlideshowJob::for_slug(&self.layout, &slug, IMAGES_PER_TOPIC);
        let encoded = self.assembler.assemble(&job).await;
        spinner.finish_and_clear();
        encoded?;

        Ok(TopicArtifacts {
            topic: topic.to_string(),
            slug,
            script_path,
            audio_path,
            image_paths,
            video_path: job.output,
        })
    }
}

/// Files produced for one topic.
#[derive(Debug, Clone)]
pub struct TopicArtifacts {
    pub topic: String,
    pub slug: String,
    pub script_path: PathBuf,
    pub audio_path: PathBuf,
    pub image_paths: Vec<PathBuf>,
    pub video_path: PathBuf,
}

/// A topic that failed under [`FailurePolicy::Continue`].
#[derive(Debug, Clone)]
pub struct TopicFailure {
    pub topic: String,
    pub slug: String,
    pub error: String,
}

/// Outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub completed: Vec<TopicArtifacts>,
    pub failed: Vec<TopicFailure>,
}
