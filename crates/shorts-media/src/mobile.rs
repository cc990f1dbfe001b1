//! Portrait compositing with a blurred background.

use std::path::Path;
use tracing::{debug, info};

use shorts_models::{EncodingConfig, LayoutPlan};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::build_mobile_filter;
use crate::fs_utils::is_non_empty_file;

/// Build the compositing command for `clip` laid out by `plan`.
pub fn mobile_command(
    clip: &Path,
    plan: &LayoutPlan,
    encoding: &EncodingConfig,
    output: &Path,
) -> FfmpegCommand {
    FfmpegCommand::new(clip, output)
        .filter_complex(build_mobile_filter(plan, &encoding.background_blur))
        .encoding(encoding)
}

/// Re-render `clip` onto the portrait canvas described by `plan`.
///
/// Sources narrower than the canvas aspect cannot fill the background
/// crop and are rejected before FFmpeg runs.
pub async fn compose_mobile(
    runner: &FfmpegRunner,
    clip: &Path,
    plan: &LayoutPlan,
    encoding: &EncodingConfig,
    output: &Path,
) -> MediaResult<()> {
    if !clip.exists() {
        return Err(MediaError::FileNotFound(clip.to_path_buf()));
    }
    if !plan.background_covers_canvas() {
        return Err(MediaError::invalid_video(format!(
            "Background {}x{} cannot cover a {}x{} canvas",
            plan.bg_w, plan.bg_h, plan.target.width, plan.target.height
        )));
    }

    info!(
        "Composing mobile clip: {} -> {} (fg {}x{} @ {},{})",
        clip.display(),
        output.display(),
        plan.fg_w,
        plan.fg_h,
        plan.fg_x,
        plan.fg_y
    );

    let cmd = mobile_command(clip, plan, encoding, output);
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    runner
        .run_with_progress(&cmd, move |progress| {
            debug!(
                output = %name,
                out_time_ms = progress.out_time_ms,
                speed = progress.speed,
                complete = progress.is_complete,
                "Mobile render progress"
            );
        })
        .await?;

    if !is_non_empty_file(output).await {
        return Err(MediaError::ffmpeg_failed(
            format!("FFmpeg produced no output for {}", output.display()),
            None,
            Some(0),
        ));
    }

    Ok(())
}
