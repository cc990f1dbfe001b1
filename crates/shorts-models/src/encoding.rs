//! Encoding configuration for the mobile compositor.

use serde::{Deserialize, Serialize};

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec; the compositor only touches video
pub const DEFAULT_AUDIO_CODEC: &str = "copy";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "fast";
/// Default CRF (Constant Rate Factor)
pub const DEFAULT_CRF: u8 = 18;
/// Audio bitrate used when the audio stream is re-encoded
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";
/// Background blur passed to `boxblur` (luma radius:power)
pub const DEFAULT_BACKGROUND_BLUR: &str = "15:3";

/// Video encoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Video codec (e.g., "libx264", "h264_nvenc")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g., "fast", "medium", "slow")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant Rate Factor (quality, 0-51, lower is better)
    #[serde(default = "default_crf")]
    pub crf: u8,

    /// Audio codec ("copy" keeps the source stream)
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate, ignored for "copy"
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// `boxblur` argument for the background layer
    #[serde(default = "default_background_blur")]
    pub background_blur: String,

    /// Additional FFmpeg output arguments
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_crf() -> u8 {
    DEFAULT_CRF
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}
fn default_audio_bitrate() -> String {
    DEFAULT_AUDIO_BITRATE.to_string()
}
fn default_background_blur() -> String {
    DEFAULT_BACKGROUND_BLUR.to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            background_blur: DEFAULT_BACKGROUND_BLUR.to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl EncodingConfig {
    /// Returns a new config with updated CRF.
    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf.min(51);
        self
    }

    /// Returns a new config that re-encodes audio with the given codec.
    pub fn with_audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.audio_codec = codec.into();
        self
    }

    /// Whether the audio stream is passed through untouched.
    pub fn copies_audio(&self) -> bool {
        self.audio_codec == "copy"
    }

    /// Convert to FFmpeg output arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
        ];

        if !self.copies_audio() {
            args.extend_from_slice(&["-b:a".to_string(), self.audio_bitrate.clone()]);
        }

        args.extend(self.extra_args.clone());

        args
    }
}
