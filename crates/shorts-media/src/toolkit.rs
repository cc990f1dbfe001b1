//! Collaborator traits for the shorts pipeline and their FFmpeg implementation.
//!
//! The worker only talks to these traits, so tests can swap in fakes
//! without spawning processes.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use metrics::histogram;
use tracing::warn;

use shorts_models::{EncodingConfig, LayoutPlan, VideoInfo};

use crate::command::FfmpegRunner;
use crate::error::MediaResult;
use crate::{clip, detect, mobile, probe};

/// Histogram of FFmpeg/FFprobe wall time, labelled by operation.
pub const FFMPEG_DURATION_SECONDS: &str = "shorts_ffmpeg_duration_seconds";

/// Reads basic stream information from a media file.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> MediaResult<VideoInfo>;
}

/// Finds cut candidates in a media file.
///
/// Detection failures are not fatal to planning: implementations log and
/// return an empty list.
#[async_trait]
pub trait CutDetector: Send + Sync {
    /// Timestamps of scene changes above `threshold` (0.0-1.0).
    async fn detect_scenes(&self, path: &Path, threshold: f64) -> Vec<f64>;

    /// Start timestamps of pauses quieter than `threshold_db` lasting at
    /// least `min_silence_secs`.
    async fn detect_silences(&self, path: &Path, threshold_db: f64, min_silence_secs: f64) -> Vec<f64>;
}

/// Writes clip files.
#[async_trait]
pub trait SegmentRenderer: Send + Sync {
    /// Copy `[start, end)` of `input` into `output` without re-encoding.
    async fn extract_segment(&self, input: &Path, start: f64, end: f64, output: &Path) -> MediaResult<()>;

    /// Re-render `clip` onto a portrait canvas laid out by `plan`.
    async fn compose_mobile(&self, clip: &Path, plan: &LayoutPlan, output: &Path) -> MediaResult<()>;
}

/// FFmpeg/FFprobe backed implementation of every collaborator.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit {
    runner: FfmpegRunner,
    encoding: EncodingConfig,
}

impl FfmpegToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any single FFmpeg invocation running longer than `secs`.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.runner = self.runner.with_optional_timeout(secs);
        self
    }

    /// Encoding settings for the mobile compositor.
    pub fn with_encoding(mut self, encoding: EncodingConfig) -> Self {
        self.encoding = encoding;
        self
    }
}

fn record_duration(op: &'static str, started: Instant) {
    let labels = [("op", op.to_string())];
    histogram!(FFMPEG_DURATION_SECONDS, &labels).record(started.elapsed().as_secs_f64());
}

#[async_trait]
impl MediaInspector for FfmpegToolkit {
    async fn inspect(&self, path: &Path) -> MediaResult<VideoInfo> {
        let started = Instant::now();
        let result = probe::probe_video(path).await;
        record_duration("probe", started);
        result
    }
}

#[async_trait]
impl CutDetector for FfmpegToolkit {
    async fn detect_scenes(&self, path: &Path, threshold: f64) -> Vec<f64> {
        let started = Instant::now();
        let result = detect::detect_scene_changes(&self.runner, path, threshold).await;
        record_duration("scene_detect", started);

        result.unwrap_or_else(|e| {
            warn!(
                input = %path.display(),
                error = %e,
                stderr = e.stderr_tail(5).unwrap_or_default(),
                "Scene detection failed, continuing without scene cuts"
            );
            Vec::new()
        })
    }

    async fn detect_silences(&self, path: &Path, threshold_db: f64, min_silence_secs: f64) -> Vec<f64> {
        let started = Instant::now();
        let result =
            detect::detect_silence_starts(&self.runner, path, threshold_db, min_silence_secs).await;
        record_duration("silence_detect", started);

        result.unwrap_or_else(|e| {
            warn!(
                input = %path.display(),
                error = %e,
                stderr = e.stderr_tail(5).unwrap_or_default(),
                "Silence detection failed, continuing without silence cuts"
            );
            Vec::new()
        })
    }
}

#[async_trait]
impl SegmentRenderer for FfmpegToolkit {
    async fn extract_segment(&self, input: &Path, start: f64, end: f64, output: &Path) -> MediaResult<()> {
        let started = Instant::now();
        let result = clip::extract_segment(&self.runner, input, start, end, output).await;
        record_duration("cut", started);
        result
    }

    async fn compose_mobile(&self, clip: &Path, plan: &LayoutPlan, output: &Path) -> MediaResult<()> {
        let started = Instant::now();
        let result = mobile::compose_mobile(&self.runner, clip, plan, &self.encoding, output).await;
        record_duration("mobile", started);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detection_failure_yields_no_candidates() {
        let toolkit = FfmpegToolkit::new().with_timeout(Some(5));
        let missing = Path::new("/nonexistent/talk.mp4");

        // Either ffmpeg is missing or it fails to open the input
        assert!(toolkit.detect_scenes(missing, 0.3).await.is_empty());
        assert!(toolkit.detect_silences(missing, -30.0, 1.0).await.is_empty());
    }

    #[test]
    fn test_builder_settings() {
        let toolkit = FfmpegToolkit::new()
            .with_timeout(None)
            .with_encoding(EncodingConfig::default().with_crf(23));
        assert_eq!(toolkit.encoding.crf, 23);
        assert_eq!(toolkit.encoding.audio_codec, "copy");
    }

    #[tokio::test]
    async fn test_inspect_missing_file() {
        let toolkit = FfmpegToolkit::new();
        assert!(toolkit.inspect(Path::new("/nonexistent/talk.mp4")).await.is_err());
    }
}
