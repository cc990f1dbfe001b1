//! Per-video processing: inspect, detect, plan, cut, compose.
//!
//! Failure policy:
//! - inspection failure fails the video
//! - detector failure only removes that detector's candidates
//! - a failed cut fails that segment; siblings still render
//! - a failed composite keeps the original-aspect cut under the final name

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn, Instrument};

use shorts_media::fs_utils::{move_file, remove_if_exists};
use shorts_media::{compute_layout, plan_segments, CutDetector, MediaInspector, SegmentRenderer};
use shorts_models::{LayoutPlan, Segment};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::VideoLogger;
use crate::metrics;
use crate::report::{SegmentOutcome, SegmentReport, VideoReport, VideoStatus};

/// Runs the shorts pipeline for single videos against a toolkit.
pub struct ShortsPipeline<T> {
    toolkit: Arc<T>,
    config: Arc<WorkerConfig>,
    ffmpeg_semaphore: Arc<Semaphore>,
}

impl<T> ShortsPipeline<T>
where
    T: MediaInspector + CutDetector + SegmentRenderer,
{
    pub fn new(toolkit: T, config: WorkerConfig) -> Self {
        let permits = config.max_ffmpeg_processes.max(1);
        Self {
            toolkit: Arc::new(toolkit),
            config: Arc::new(config),
            ffmpeg_semaphore: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Folder receiving the shorts of `input`.
    pub fn video_output_dir(&self, input: &Path) -> PathBuf {
        self.config.output_dir.join(file_stem(input))
    }

    /// Process one video into numbered shorts.
    ///
    /// Errors are returned only when nothing about the video could be
    /// attempted (inspection, planning, output folder); per-segment
    /// failures are recorded in the report.
    pub async fn process_video(&self, input: &Path, logger: &VideoLogger) -> WorkerResult<VideoReport> {
        self.process_video_into(input, &self.video_output_dir(input), logger)
            .await
    }

    /// Like [`Self::process_video`], writing shorts into `output_dir`.
    pub async fn process_video_into(
        &self,
        input: &Path,
        output_dir: &Path,
        logger: &VideoLogger,
    ) -> WorkerResult<VideoReport> {
        let span = logger.create_span();
        self.process_video_inner(input, output_dir, logger)
            .instrument(span)
            .await
    }

    async fn process_video_inner(
        &self,
        input: &Path,
        output_dir: &Path,
        logger: &VideoLogger,
    ) -> WorkerResult<VideoReport> {
        logger.log_start(&input.display().to_string());

        let info = self.toolkit.inspect(input).await?;
        logger.log_progress(&format!(
            "{:.1}s, {}x{}, audio: {}",
            info.duration, info.width, info.height, info.has_audio
        ));

        let detection = &self.config.detection;
        let (scene_times, silence_times) = tokio::join!(
            async {
                let _permit = self.ffmpeg_semaphore.acquire().await;
                self.toolkit
                    .detect_scenes(input, detection.scene_threshold)
                    .await
            },
            async {
                let _permit = self.ffmpeg_semaphore.acquire().await;
                self.toolkit
                    .detect_silences(
                        input,
                        detection.silence_threshold_db,
                        detection.min_silence_secs,
                    )
                    .await
            }
        );
        logger.log_progress(&format!(
            "{} scene changes, {} silence pauses",
            scene_times.len(),
            silence_times.len()
        ));

        let segments = plan_segments(
            info.duration,
            &scene_times,
            &silence_times,
            &self.config.segmentation,
        )
        .map_err(|e| WorkerError::invalid_input(e.to_string()))?;

        let mut report = VideoReport {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            status: VideoStatus::NoSegments,
            duration: info.duration,
            scene_cuts: scene_times.len(),
            silence_cuts: silence_times.len(),
            segments: Vec::new(),
            error: None,
        };

        if segments.is_empty() {
            logger.log_warning(&format!(
                "No suitable segments in {:.1}s (minimum {:.0}s)",
                info.duration, self.config.segmentation.min_duration
            ));
            return Ok(report);
        }
        logger.log_progress(&format!("Planned {} segments", segments.len()));

        let layout = if self.config.mobile {
            match compute_layout(info.width, info.height, &self.config.layout) {
                Ok(plan) => Some(plan),
                Err(e) => {
                    logger.log_warning(&format!("Mobile layout unavailable, keeping original aspect: {e}"));
                    None
                }
            }
        } else {
            None
        };

        tokio::fs::create_dir_all(output_dir).await?;

        let stem = file_stem(input);
        let renders = segments.iter().enumerate().map(|(i, segment)| {
            self.render_segment(input, output_dir, &stem, i + 1, *segment, layout.as_ref(), logger)
        });
        report.segments = join_all(renders).await;

        let produced = report.produced();
        report.status = if produced > 0 {
            VideoStatus::Completed
        } else {
            VideoStatus::Failed
        };
        if produced == 0 {
            report.error = Some("Every segment failed to render".to_string());
        }

        logger.log_completion(&format!(
            "{} of {} shorts written to {}",
            produced,
            report.segments.len(),
            output_dir.display()
        ));
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    async fn render_segment(
        &self,
        input: &Path,
        output_dir: &Path,
        stem: &str,
        index: usize,
        segment: Segment,
        layout: Option<&LayoutPlan>,
        logger: &VideoLogger,
    ) -> SegmentReport {
        let name = short_file_name(stem, index, segment.duration());
        let final_path = output_dir.join(&name);

        let mut report = SegmentReport {
            index,
            segment,
            output: final_path.clone(),
            outcome: SegmentOutcome::Failed,
            error: None,
        };

        let _permit = match self.ffmpeg_semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                report.error = Some(e.to_string());
                metrics::record_segment(report.outcome);
                return report;
            }
        };

        let Some(layout) = layout else {
            // Cut straight to the final name
            match self
                .toolkit
                .extract_segment(input, segment.start, segment.end, &final_path)
                .await
            {
                Ok(()) => report.outcome = SegmentOutcome::Original,
                Err(e) => {
                    logger.log_error(&format!("Segment {index} cut failed: {e}"));
                    let _ = remove_if_exists(&final_path).await;
                    report.error = Some(e.to_string());
                }
            }
            metrics::record_segment(report.outcome);
            return report;
        };

        let temp_path = output_dir.join(format!("temp_{name}"));

        if let Err(e) = self
            .toolkit
            .extract_segment(input, segment.start, segment.end, &temp_path)
            .await
        {
            logger.log_error(&format!("Segment {index} cut failed: {e}"));
            let _ = remove_if_exists(&temp_path).await;
            report.error = Some(e.to_string());
            metrics::record_segment(report.outcome);
            return report;
        }

        match self.toolkit.compose_mobile(&temp_path, layout, &final_path).await {
            Ok(()) => {
                if let Err(e) = remove_if_exists(&temp_path).await {
                    warn!(path = %temp_path.display(), error = %e, "Failed to remove temp clip");
                }
                report.outcome = SegmentOutcome::Mobile;
            }
            Err(e) => {
                logger.log_warning(&format!(
                    "Segment {index} mobile conversion failed, keeping original: {e}"
                ));
                let _ = remove_if_exists(&final_path).await;
                match move_file(&temp_path, &final_path).await {
                    Ok(()) => {
                        report.outcome = SegmentOutcome::Original;
                        report.error = Some(e.to_string());
                    }
                    Err(move_err) => {
                        logger.log_error(&format!("Segment {index} fallback failed: {move_err}"));
                        let _ = remove_if_exists(&temp_path).await;
                        report.error = Some(format!("{e}; fallback: {move_err}"));
                    }
                }
            }
        }

        debug!(
            index,
            start = segment.start,
            end = segment.end,
            outcome = report.outcome.as_str(),
            "Segment finished"
        );
        metrics::record_segment(report.outcome);
        report
    }
}

/// File stem used for the output folder and short names.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "video".to_string())
}

/// `<stem>_part_<NN>_(<D>s).mp4`, with the duration rounded to whole seconds.
pub fn short_file_name(stem: &str, index: usize, duration_secs: f64) -> String {
    format!("{stem}_part_{index:02}_({:.0}s).mp4", duration_secs.max(0.0))
}
