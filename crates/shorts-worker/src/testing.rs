//! In-memory toolkit for pipeline and batch tests.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use shorts_media::{CutDetector, MediaError, MediaInspector, MediaResult, SegmentRenderer};
use shorts_models::{LayoutPlan, VideoInfo};

/// Writes marker files instead of running FFmpeg.
#[derive(Debug, Default)]
pub(crate) struct FakeToolkit {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub scenes: Vec<f64>,
    pub silences: Vec<f64>,
    pub fail_inspect: bool,
    pub missing_ffprobe: bool,
    /// Segment starts whose cut fails
    pub failing_cuts: HashSet<u64>,
    pub fail_mobile: bool,
    pub cuts: Mutex<Vec<(f64, f64)>>,
}

impl FakeToolkit {
    pub fn landscape(duration: f64, scenes: &[f64], silences: &[f64]) -> Self {
        Self {
            duration,
            width: 1920,
            height: 1080,
            scenes: scenes.to_vec(),
            silences: silences.to_vec(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MediaInspector for FakeToolkit {
    async fn inspect(&self, path: &Path) -> MediaResult<VideoInfo> {
        if self.missing_ffprobe {
            return Err(MediaError::FfprobeNotFound);
        }
        if self.fail_inspect || path.to_string_lossy().contains("broken") {
            return Err(MediaError::invalid_video("No video stream found"));
        }
        Ok(VideoInfo {
            duration: self.duration,
            width: self.width,
            height: self.height,
            fps: 30.0,
            codec: "h264".to_string(),
            size: 0,
            bitrate: 0,
            has_audio: true,
        })
    }
}

#[async_trait]
impl CutDetector for FakeToolkit {
    async fn detect_scenes(&self, _path: &Path, _threshold: f64) -> Vec<f64> {
        self.scenes.clone()
    }

    async fn detect_silences(&self, _path: &Path, _threshold_db: f64, _min_silence_secs: f64) -> Vec<f64> {
        self.silences.clone()
    }
}

#[async_trait]
impl SegmentRenderer for FakeToolkit {
    async fn extract_segment(&self, _input: &Path, start: f64, end: f64, output: &Path) -> MediaResult<()> {
        self.cuts.lock().unwrap().push((start, end));
        if self.failing_cuts.contains(&(start as u64)) {
            return Err(MediaError::ffmpeg_failed("cut failed", None, Some(1)));
        }
        tokio::fs::write(output, format!("cut {start}-{end}")).await?;
        Ok(())
    }

    async fn compose_mobile(&self, clip: &Path, plan: &LayoutPlan, output: &Path) -> MediaResult<()> {
        if self.fail_mobile {
            // Partial output, as a crashed encode leaves behind
            tokio::fs::write(output, b"partial").await?;
            return Err(MediaError::ffmpeg_failed("overlay failed", None, Some(1)));
        }
        let cut = tokio::fs::read_to_string(clip).await?;
        tokio::fs::write(output, format!("mobile {}x{} {cut}", plan.fg_w, plan.fg_h)).await?;
        Ok(())
    }
}
