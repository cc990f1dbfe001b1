//! Cut-candidate detection through FFmpeg analysis filters.
//!
//! Both detectors decode the whole input once and read timestamps back
//! from FFmpeg's stderr log:
//! - scene changes via `select='gt(scene,T)',showinfo` (`pts_time:` fields)
//! - silence via `silencedetect` (`silence_start:` fields)

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the scene-change analysis command.
pub fn scene_detection_command(input: &Path, threshold: f64) -> FfmpegCommand {
    FfmpegCommand::analyze(input)
        .video_filter(format!("select='gt(scene,{threshold})',showinfo"))
        .no_audio()
}

/// Build the silence analysis command.
pub fn silence_detection_command(input: &Path, noise_db: f64, min_silence_secs: f64) -> FfmpegCommand {
    FfmpegCommand::analyze(input)
        .audio_filter(format!(
            "silencedetect=noise={noise_db}dB:duration={min_silence_secs}"
        ))
        .no_video()
}

/// Detect scene changes, returning their timestamps in seconds.
pub async fn detect_scene_changes(
    runner: &FfmpegRunner,
    input: &Path,
    threshold: f64,
) -> MediaResult<Vec<f64>> {
    let started = Instant::now();
    let cmd = scene_detection_command(input, threshold);
    let stderr = runner.run_capture(&cmd).await?;

    let times = parse_scene_times(&stderr);
    info!(
        input = %input.display(),
        threshold,
        count = times.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Scene detection complete"
    );
    Ok(times)
}

/// Detect silence pauses, returning the timestamps where each one starts.
pub async fn detect_silence_starts(
    runner: &FfmpegRunner,
    input: &Path,
    noise_db: f64,
    min_silence_secs: f64,
) -> MediaResult<Vec<f64>> {
    let started = Instant::now();
    let cmd = silence_detection_command(input, noise_db, min_silence_secs);
    let stderr = runner.run_capture(&cmd).await?;

    let times = parse_silence_starts(&stderr);
    info!(
        input = %input.display(),
        noise_db,
        min_silence_secs,
        count = times.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Silence detection complete"
    );
    Ok(times)
}

/// Extract `pts_time:` values from `showinfo` log lines.
pub fn parse_scene_times(stderr: &str) -> Vec<f64> {
    stderr
        .lines()
        .filter(|line| line.contains("showinfo"))
        .filter_map(|line| field_value(line, "pts_time:"))
        .collect()
}

/// Extract `silence_start:` values from `silencedetect` log lines.
pub fn parse_silence_starts(stderr: &str) -> Vec<f64> {
    stderr
        .lines()
        .filter_map(|line| field_value(line, "silence_start:"))
        .collect()
}

/// Parse the number following `key` up to the next whitespace.
fn field_value(line: &str, key: &str) -> Option<f64> {
    let idx = line.find(key)?;
    let rest = line[idx + key.len()..].trim_start();
    let token = rest.split_whitespace().next()?;

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(line, "Ignoring unparsable {} value", key.trim_end_matches(':'));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWINFO_LOG: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'talk.mp4':
  Duration: 00:10:15.25, start: 0.000000, bitrate: 1363 kb/s
[Parsed_showinfo_1 @ 0x55d0c8a3c740] config in time_base: 1/15360, frame_rate: 30/1
[Parsed_showinfo_1 @ 0x55d0c8a3c740] n:   0 pts:1536000 pts_time:100     duration:512 pos:12345 fmt:yuv420p sar:1/1 s:1920x1080 i:P iskey:0 type:P checksum:1A2B3C4D
[Parsed_showinfo_1 @ 0x55d0c8a3c740] color_range:tv color_space:bt709
[Parsed_showinfo_1 @ 0x55d0c8a3c740] n:   1 pts:3840000 pts_time:250.033 duration:512 pos:98765 fmt:yuv420p sar:1/1 s:1920x1080 i:P iskey:1 type:I checksum:5E6F7A8B
frame=    2 fps=0.0 q=-0.0 Lsize=N/A time=00:04:10.03 bitrate=N/A speed= 412x
";

    const SILENCE_LOG: &str = "\
[silencedetect @ 0x5600f8e1a9c0] silence_start: 50.0213
[silencedetect @ 0x5600f8e1a9c0] silence_end: 52.4 | silence_duration: 2.37867
[silencedetect @ 0x5600f8e1a9c0] silence_start: -0.00133333
[silencedetect @ 0x5600f8e1a9c0] silence_end: 1.2 | silence_duration: 1.20133
[silencedetect @ 0x5600f8e1a9c0] silence_start: 398.5
size=N/A time=00:06:40.00 bitrate=N/A speed= 900x
";

    #[test]
    fn test_parse_scene_times() {
        let times = parse_scene_times(SHOWINFO_LOG);
        assert_eq!(times, vec![100.0, 250.033]);
    }

    #[test]
    fn test_parse_silence_starts() {
        let times = parse_silence_starts(SILENCE_LOG);
        assert_eq!(times.len(), 3);
        assert!((times[0] - 50.0213).abs() < 1e-9);
        assert!(times[1] < 0.0, "negative starts are left for the planner to drop");
        assert!((times[2] - 398.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        assert!(parse_scene_times("").is_empty());
        assert!(parse_scene_times("[Parsed_showinfo_1 @ 0x1] n: 0 pts_time:nan").is_empty());
        assert!(parse_silence_starts("silence_start:").is_empty());
        // pts_time outside showinfo lines is not a scene change
        assert!(parse_scene_times("[other @ 0x1] pts_time:12.0").is_empty());
    }

    #[test]
    fn test_detection_commands() {
        let args = scene_detection_command(Path::new("in.mp4"), 0.3).build_args();
        assert!(args.contains(&"select='gt(scene,0.3)',showinfo".to_string()));
        assert!(args.contains(&"-an".to_string()));

        let args = silence_detection_command(Path::new("in.mp4"), -30.0, 1.0).build_args();
        assert!(args.contains(&"silencedetect=noise=-30dB:duration=1".to_string()));
        assert!(args.contains(&"-vn".to_string()));
    }
}
