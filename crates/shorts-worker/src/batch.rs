//! Batch runner over a file or a folder of videos.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use shorts_media::{CutDetector, MediaInspector, SegmentRenderer};
use shorts_models::is_supported_video;

use crate::error::{WorkerError, WorkerResult};
use crate::logging::VideoLogger;
use crate::metrics;
use crate::pipeline::{file_stem, ShortsPipeline};
use crate::report::{BatchSummary, VideoReport};

/// Resolve `input` to the list of videos to process.
///
/// A file is taken as-is if its extension is supported. A folder is
/// searched recursively; results are sorted for a stable run order.
pub async fn find_videos(input: &Path) -> WorkerResult<Vec<PathBuf>> {
    let metadata = tokio::fs::metadata(input).await.map_err(|e| {
        WorkerError::invalid_input(format!("Cannot read {}: {}", input.display(), e))
    })?;

    if metadata.is_file() {
        if !is_supported_video(input) {
            return Err(WorkerError::invalid_input(format!(
                "Unsupported video format: {}",
                input.display()
            )));
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut videos = Vec::new();
    let mut pending = vec![input.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                continue;
            }
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(path);
            } else if is_supported_video(&path) {
                videos.push(path);
            }
        }
    }

    if videos.is_empty() {
        return Err(WorkerError::NoVideos(input.to_path_buf()));
    }

    videos.sort();
    Ok(videos)
}

/// Output folder name for each of `videos`, in order.
///
/// Folders are named after the file stem. A stem already taken by an
/// earlier video (same name in another subfolder) gets `_2`, `_3`, ...
pub fn output_folder_names(videos: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();

    videos
        .iter()
        .map(|video| {
            let stem = file_stem(video);
            let mut name = stem.clone();
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{stem}_{n}");
                n += 1;
            }
            if name != stem {
                warn!(
                    video = %video.display(),
                    folder = %name,
                    "Output folder {} already used by another video", stem
                );
            }
            name
        })
        .collect()
}

/// Process `videos` one after another.
///
/// A failing video is recorded and the batch moves on, unless the error
/// makes every later video fail too (missing FFmpeg, bad configuration).
pub async fn run_batch<T>(
    pipeline: &ShortsPipeline<T>,
    input: &Path,
    videos: &[PathBuf],
) -> WorkerResult<BatchSummary>
where
    T: MediaInspector + CutDetector + SegmentRenderer,
{
    let mut summary = BatchSummary::new(input, &pipeline.config().output_dir);
    let run_id = summary.run_id.to_string();

    info!(
        run_id = %run_id,
        videos = videos.len(),
        output_dir = %pipeline.config().output_dir.display(),
        "Starting batch"
    );

    let folders = output_folder_names(videos);

    for (i, (video, folder)) in videos.iter().zip(&folders).enumerate() {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| video.display().to_string());
        let logger = VideoLogger::new(run_id.as_str(), name);
        logger.log_progress(&format!("Video {} of {}", i + 1, videos.len()));

        let output_dir = pipeline.config().output_dir.join(folder);

        let report = match pipeline.process_video_into(video, &output_dir, &logger).await {
            Ok(report) => report,
            Err(e) if e.is_fatal() => {
                logger.log_error(&e.to_string());
                return Err(e);
            }
            Err(e) => {
                logger.log_error(&e.to_string());
                VideoReport::failed(video, &output_dir, &e)
            }
        };

        metrics::record_video(report.status);
        summary.push(report);
    }

    summary.finish();
    Ok(summary)
}
