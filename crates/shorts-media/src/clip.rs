//! Lossless segment extraction.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::fs_utils::is_non_empty_file;

/// Build the stream-copy cut command for `[start_secs, end_secs)`.
///
/// Seeking happens on the input side, so the cut snaps to the keyframe
/// at or before `start_secs`.
pub fn cut_command(input: &Path, output: &Path, start_secs: f64, end_secs: f64) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .seek(start_secs)
        .duration(end_secs - start_secs)
        .codec_copy()
        .avoid_negative_ts("make_zero")
}

/// Extract `[start_secs, end_secs)` of `input` into `output` without re-encoding.
pub async fn extract_segment(
    runner: &FfmpegRunner,
    input: &Path,
    start_secs: f64,
    end_secs: f64,
    output: &Path,
) -> MediaResult<()> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if !(start_secs.is_finite() && end_secs.is_finite() && start_secs >= 0.0 && end_secs > start_secs) {
        return Err(MediaError::invalid_video(format!(
            "Invalid segment range {start_secs:.3}..{end_secs:.3}"
        )));
    }

    info!(
        "Extracting segment: {} -> {} ({:.2}s - {:.2}s)",
        input.display(),
        output.display(),
        start_secs,
        end_secs
    );

    let cmd = cut_command(input, output, start_secs, end_secs);
    runner.run(&cmd).await?;

    // A zero exit with nothing written still leaves no usable clip
    if !is_non_empty_file(output).await {
        return Err(MediaError::ffmpeg_failed(
            format!("FFmpeg produced no output for {}", output.display()),
            None,
            Some(0),
        ));
    }

    Ok(())
}
