//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use shorts_models::{LayoutError, PlanError};

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid segmentation input: {0}")]
    Plan(#[from] PlanError),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create an invalid video error.
    pub fn invalid_video(message: impl Into<String>) -> Self {
        Self::InvalidVideo(message.into())
    }

    /// Whether the error means the external tools are missing entirely.
    ///
    /// Every later ffmpeg call will fail the same way, so callers abort
    /// instead of degrading.
    pub fn is_missing_tool(&self) -> bool {
        matches!(self, Self::FfmpegNotFound | Self::FfprobeNotFound)
    }

    /// Last lines of captured stderr, if any.
    pub fn stderr_tail(&self, lines: usize) -> Option<String> {
        let stderr = match self {
            Self::FfmpegFailed { stderr, .. } | Self::FfprobeFailed { stderr, .. } => {
                stderr.as_deref()?
            }
            _ => return None,
        };

        let tail: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let start = tail.len().saturating_sub(lines);
        Some(tail[start..].join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail() {
        let err = MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some("line one\n\nline two\nline three\n".to_string()),
            Some(1),
        );
        assert_eq!(err.stderr_tail(2).as_deref(), Some("line two\nline three"));
        assert_eq!(MediaError::Timeout(5).stderr_tail(2), None);
    }

    #[test]
    fn test_missing_tool() {
        assert!(MediaError::FfmpegNotFound.is_missing_tool());
        assert!(MediaError::FfprobeNotFound.is_missing_tool());
        assert!(!MediaError::invalid_video("no stream").is_missing_tool());
    }

    #[test]
    fn test_layout_error_conversion() {
        let err: MediaError = LayoutError::InvalidScaleFactor(0.5).into();
        assert!(err.to_string().contains("0.5"));
    }
}
