//! Per-video and per-batch results.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shorts_models::Segment;

use crate::error::WorkerResult;

/// What ended up on disk for one planned segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// 9:16 composite written
    Mobile,
    /// Original-aspect cut kept (compositing disabled or failed)
    Original,
    /// Nothing written
    Failed,
}

impl SegmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentOutcome::Mobile => "mobile",
            SegmentOutcome::Original => "original",
            SegmentOutcome::Failed => "failed",
        }
    }

    pub fn is_produced(&self) -> bool {
        !matches!(self, SegmentOutcome::Failed)
    }
}

/// Result for one planned segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentReport {
    /// 1-based position within the video
    pub index: usize,
    pub segment: Segment,
    pub output: PathBuf,
    pub outcome: SegmentOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Overall result for one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// At least one short was written
    Completed,
    /// The video is too short for any segment
    NoSegments,
    /// Inspection failed or every segment failed
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Completed => "completed",
            VideoStatus::NoSegments => "no_segments",
            VideoStatus::Failed => "failed",
        }
    }
}

/// Result for one source video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub status: VideoStatus,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub scene_cuts: usize,
    #[serde(default)]
    pub silence_cuts: usize,
    #[serde(default)]
    pub segments: Vec<SegmentReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VideoReport {
    /// Report for a video that failed before any segment was attempted.
    pub fn failed(input: &Path, output_dir: &Path, error: impl ToString) -> Self {
        Self {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            status: VideoStatus::Failed,
            duration: 0.0,
            scene_cuts: 0,
            silence_cuts: 0,
            segments: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn produced(&self) -> usize {
        self.segments.iter().filter(|s| s.outcome.is_produced()).count()
    }

    pub fn count(&self, outcome: SegmentOutcome) -> usize {
        self.segments.iter().filter(|s| s.outcome == outcome).count()
    }
}

/// Result of one batch run, written as `summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub videos: Vec<VideoReport>,
}

impl BatchSummary {
    pub fn new(input: &Path, output_dir: &Path) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            videos: Vec::new(),
        }
    }

    pub fn push(&mut self, report: VideoReport) {
        self.videos.push(report);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Total shorts written across all videos.
    pub fn total_produced(&self) -> usize {
        self.videos.iter().map(VideoReport::produced).sum()
    }

    pub fn videos_with(&self, status: VideoStatus) -> usize {
        self.videos.iter().filter(|v| v.status == status).count()
    }

    /// Whether the run counts as a success for the exit code.
    ///
    /// Videos too short to segment do not count against the run; only a
    /// run where every attempted video failed does.
    pub fn is_success(&self) -> bool {
        self.videos.is_empty()
            || self.total_produced() > 0
            || self.videos_with(VideoStatus::Failed) == 0
    }

    /// Write the summary as pretty JSON.
    pub async fn write_json(&self, path: &Path) -> WorkerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Emit one log line per video and a closing total.
    pub fn log(&self) {
        for video in &self.videos {
            info!(
                run_id = %self.run_id,
                video = %video.input.display(),
                status = video.status.as_str(),
                mobile = video.count(SegmentOutcome::Mobile),
                original = video.count(SegmentOutcome::Original),
                failed = video.count(SegmentOutcome::Failed),
                error = video.error.as_deref().unwrap_or(""),
                "Video summary"
            );
        }

        info!(
            run_id = %self.run_id,
            videos = self.videos.len(),
            completed = self.videos_with(VideoStatus::Completed),
            no_segments = self.videos_with(VideoStatus::NoSegments),
            failed = self.videos_with(VideoStatus::Failed),
            shorts = self.total_produced(),
            output_dir = %self.output_dir.display(),
            "Batch finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_report(index: usize, outcome: SegmentOutcome) -> SegmentReport {
        SegmentReport {
            index,
            segment: Segment::new(0.0, 60.0),
            output: PathBuf::from(format!("out/talk_part_{index:02}_(60s).mp4")),
            outcome,
            error: None,
        }
    }

    fn video(status: VideoStatus, outcomes: &[SegmentOutcome]) -> VideoReport {
        VideoReport {
            input: PathBuf::from("talk.mp4"),
            output_dir: PathBuf::from("out/talk"),
            status,
            duration: 400.0,
            scene_cuts: 2,
            silence_cuts: 1,
            segments: outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| segment_report(i + 1, *o))
                .collect(),
            error: None,
        }
    }

    #[test]
    fn test_counts() {
        let report = video(
            VideoStatus::Completed,
            &[SegmentOutcome::Mobile, SegmentOutcome::Original, SegmentOutcome::Failed],
        );
        assert_eq!(report.produced(), 2);
        assert_eq!(report.count(SegmentOutcome::Failed), 1);
    }

    #[test]
    fn test_success_rules() {
        let mut summary = BatchSummary::new(Path::new("videos"), Path::new("out"));
        assert!(summary.is_success(), "nothing to do");

        summary.push(video(VideoStatus::NoSegments, &[]));
        assert!(summary.is_success());

        summary.push(VideoReport::failed(Path::new("bad.mp4"), Path::new("out/bad"), "no stream"));
        assert!(!summary.is_success());

        summary.push(video(VideoStatus::Completed, &[SegmentOutcome::Mobile]));
        assert!(summary.is_success());
    }

    #[tokio::test]
    async fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("summary.json");

        let mut summary = BatchSummary::new(Path::new("videos"), dir.path());
        summary.push(video(VideoStatus::Completed, &[SegmentOutcome::Original]));
        summary.finish();
        summary.write_json(&path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(value["videos"][0]["status"], "completed");
        assert_eq!(value["videos"][0]["segments"][0]["outcome"], "original");
        assert_eq!(value["videos"][0]["segments"][0]["segment"]["end"], 60.0);
        assert!(value["videos"][0]["segments"][0].get("error").is_none());
        assert_eq!(value["run_id"], summary.run_id.to_string());
    }
}
