//! Structured per-video logging.
//!
//! Every lifecycle event of one video carries the batch run id and the
//! video name, so interleaved output from a batch can be filtered per file.

use tracing::{error, info, warn, Span};

/// Logger bound to one video of one batch run.
#[derive(Debug, Clone)]
pub struct VideoLogger {
    run_id: String,
    video: String,
}

impl VideoLogger {
    pub fn new(run_id: impl Into<String>, video: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            video: video.into(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            video = %self.video,
            "Video started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            video = %self.video,
            "Video progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            video = %self.video,
            "Video warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            video = %self.video,
            "Video error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            video = %self.video,
            "Video completed: {}", message
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn video(&self) -> &str {
        &self.video
    }

    /// Span to instrument the video's pipeline future with.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "video",
            run_id = %self.run_id,
            video = %self.video
        )
    }
}
