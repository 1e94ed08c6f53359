//! ffmpeg-based slideshow encoder.

use super::{SlideshowJob, VideoAssembler};
use crate::config::VideoSettings;
use crate::error::{ReelError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Encodes slideshows by invoking the ffmpeg binary.
///
/// Images are fed through ffmpeg's `concat:` protocol at a fixed input
/// framerate, so the video lasts `images / framerate` seconds. The audio track
/// is neither trimmed nor looped.
#[derive(Debug, Clone)]
pub struct FfmpegAssembler {
    binary: String,
    framerate: u32,
    video_codec: String,
    audio_codec: String,
}

impl FfmpegAssembler {
    pub fn new(settings: &VideoSettings) -> Self {
        Self {
            binary: settings.ffmpeg_binary.clone(),
            framerate: settings.framerate.max(1),
            video_codec: settings.video_codec.clone(),
            audio_codec: settings.audio_codec.clone(),
        }
    }

    /// Build the ffmpeg argument list for a job.
    pub fn build_args(&self, job: &SlideshowJob) -> Vec<String> {
        let concat = job
            .images
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("|");

        vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-framerate".to_string(),
            self.framerate.to_string(),
            "-i".to_string(),
            format!("concat:{}", concat),
            "-i".to_string(),
            job.audio.to_string_lossy().into_owned(),
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-strict".to_string(),
            "experimental".to_string(),
            job.output.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for FfmpegAssembler {
    fn default() -> Self {
        Self::new(&VideoSettings::default())
    }
}

#[async_trait]
impl VideoAssembler for FfmpegAssembler {
    #[instrument(skip(self, job), fields(output = %job.output.display()))]
    async fn assemble(&self, job: &SlideshowJob) -> Result<()> {
        job.check_inputs()?;

        let args = self.build_args(job);
        debug!("{} {}", self.binary, args.join(" "));
        info!("Encoding {} images at {} fps", job.images.len(), self.framerate);

        let result = Command::new(&self.binary)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(ReelError::Video(format!("ffmpeg encode failed: {err}")))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ReelError::ToolNotFound(self.binary.clone()))
            }
            Err(e) => Err(ReelError::Video(format!("ffmpeg error: {e}"))),
        }
    }
}
