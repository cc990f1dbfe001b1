//! FFprobe video information.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use shorts_models::VideoInfo;

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
}

/// Probe a video file for information.
///
/// Fails when the file has no video stream, no positive duration or
/// zero-sized frames; nothing downstream can plan or lay out such input.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let ffprobe = check_ffprobe()?;

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: format!("FFprobe failed for {}", path.display()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let info = parse_probe_output(&output.stdout)?;
    debug!(
        path = %path.display(),
        duration = info.duration,
        width = info.width,
        height = info.height,
        "Probed video"
    );
    Ok(info)
}

/// Get video duration in seconds.
pub async fn get_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let info = probe_video(path).await?;
    Ok(info.duration)
}

/// Build [`VideoInfo`] from ffprobe's JSON document.
pub(crate) fn parse_probe_output(json: &[u8]) -> MediaResult<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(json)?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::invalid_video("No video stream found"))?;

    let has_audio = probe.streams.iter().any(|s| s.codec_type == "audio");

    // Some containers only report duration per stream
    let duration = probe
        .format
        .duration
        .as_deref()
        .or(video_stream.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::invalid_video(format!(
            "Video has no usable duration ({duration})"
        )));
    }

    let width = video_stream.width.unwrap_or(0);
    let height = video_stream.height.unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(MediaError::invalid_video(format!(
            "Video stream has invalid dimensions {width}x{height}"
        )));
    }

    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let bitrate = probe
        .format
        .bit_rate
        .as_ref()
        .and_then(|b| b.parse::<u64>().ok())
        .unwrap_or(0);

    let fps = video_stream
        .avg_frame_rate
        .as_ref()
        .and_then(|r| parse_frame_rate(r))
        .or_else(|| video_stream.r_frame_rate.as_ref().and_then(|r| parse_frame_rate(r)))
        .unwrap_or(30.0);

    Ok(VideoInfo {
        duration,
        width,
        height,
        fps,
        codec: video_stream.codec_name.clone().unwrap_or_default(),
        size,
        bitrate,
        has_audio,
    })
}

/// Parse frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 && num > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    s.parse().ok().filter(|fps: &f64| *fps > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE: &str = r#"{
        "streams": [
            {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080,
             "r_frame_rate": "30/1", "avg_frame_rate": "30000/1001"},
            {"codec_type": "audio", "codec_name": "aac"}
        ],
        "format": {"duration": "615.250000", "size": "104857600", "bit_rate": "1363000"}
    }"#;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_parse_probe_output() {
        let info = parse_probe_output(LANDSCAPE.as_bytes()).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert!((info.duration - 615.25).abs() < 1e-9);
        assert!((info.fps - 29.97).abs() < 0.01);
        assert_eq!(info.codec, "h264");
        assert_eq!(info.size, 104_857_600);
        assert!(info.has_audio);
    }

    #[test]
    fn test_stream_duration_fallback() {
        let json = r#"{
            "streams": [{"codec_type": "video", "width": 640, "height": 360,
                         "avg_frame_rate": "0/0", "r_frame_rate": "25/1", "duration": "12.5"}],
            "format": {}
        }"#;
        let info = parse_probe_output(json.as_bytes()).unwrap();
        assert!((info.duration - 12.5).abs() < 1e-9);
        assert!((info.fps - 25.0).abs() < 0.01);
        assert!(!info.has_audio);
    }

    #[test]
    fn test_rejects_unusable_input() {
        let audio_only = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "10"}}"#;
        assert!(matches!(
            parse_probe_output(audio_only.as_bytes()),
            Err(MediaError::InvalidVideo(_))
        ));

        let no_duration = r#"{"streams": [{"codec_type": "video", "width": 10, "height": 10}],
                              "format": {"duration": "N/A"}}"#;
        assert!(matches!(
            parse_probe_output(no_duration.as_bytes()),
            Err(MediaError::InvalidVideo(_))
        ));

        let zero_size = r#"{"streams": [{"codec_type": "video", "width": 0, "height": 10}],
                            "format": {"duration": "10"}}"#;
        assert!(matches!(
            parse_probe_output(zero_size.as_bytes()),
            Err(MediaError::InvalidVideo(_))
        ));

        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(MediaError::JsonParse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = probe_video("/nonexistent/video.mp4").await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
