//! Worker error types.

use std::path::PathBuf;
use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No supported video files found in {}", .0.display())]
    NoVideos(PathBuf),

    #[error("Media error: {0}")]
    Media(#[from] shorts_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the whole batch must stop rather than move to the next video.
    ///
    /// Bad configuration and missing ffmpeg/ffprobe fail every video alike.
    pub fn is_fatal(&self) -> bool {
        match self {
            WorkerError::Config(_) => true,
            WorkerError::Media(e) => e.is_missing_tool(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shorts_media::MediaError;

    #[test]
    fn test_fatal_errors() {
        assert!(WorkerError::config("min >= max").is_fatal());
        assert!(WorkerError::from(MediaError::FfmpegNotFound).is_fatal());
        assert!(!WorkerError::from(MediaError::invalid_video("no stream")).is_fatal());
        assert!(!WorkerError::invalid_input("bad range").is_fatal());
    }

    #[test]
    fn test_no_videos_message() {
        let err = WorkerError::NoVideos(PathBuf::from("/videos"));
        assert_eq!(err.to_string(), "No supported video files found in /videos");
    }
}
