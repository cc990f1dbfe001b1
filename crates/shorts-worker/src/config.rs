//! Worker configuration.

use std::path::PathBuf;
use std::str::FromStr;

use shorts_models::{DetectionConfig, EncodingConfig, MobileLayoutConfig, SegmentationConfig};

use crate::error::{WorkerError, WorkerResult};

/// Default folder for generated shorts.
pub const DEFAULT_OUTPUT_DIR: &str = "storage/output";

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root folder; each video gets a subfolder named after its file stem
    pub output_dir: PathBuf,
    /// Segment duration bounds
    pub segmentation: SegmentationConfig,
    /// Portrait canvas and foreground magnification
    pub layout: MobileLayoutConfig,
    /// Scene/silence detector thresholds
    pub detection: DetectionConfig,
    /// Mobile compositor encoding
    pub encoding: EncodingConfig,
    /// Maximum concurrent FFmpeg processes per video
    pub max_ffmpeg_processes: usize,
    /// Kill a single FFmpeg invocation after this many seconds
    pub ffmpeg_timeout_secs: Option<u64>,
    /// Re-render clips to 9:16; when off the raw cuts are kept
    pub mobile: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            segmentation: SegmentationConfig::default(),
            layout: MobileLayoutConfig::default(),
            detection: DetectionConfig::default(),
            encoding: EncodingConfig::default(),
            max_ffmpeg_processes: 4,
            ffmpeg_timeout_secs: None,
            mobile: true,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let segmentation = SegmentationConfig::new(
            read(&lookup, "SHORTS_MIN_DURATION").unwrap_or(defaults.segmentation.min_duration),
            read(&lookup, "SHORTS_MAX_DURATION").unwrap_or(defaults.segmentation.max_duration),
        );

        let detection = DetectionConfig {
            scene_threshold: read(&lookup, "SHORTS_SCENE_THRESHOLD")
                .unwrap_or(defaults.detection.scene_threshold),
            silence_threshold_db: read(&lookup, "SHORTS_SILENCE_DB")
                .unwrap_or(defaults.detection.silence_threshold_db),
            min_silence_secs: read(&lookup, "SHORTS_MIN_SILENCE")
                .unwrap_or(defaults.detection.min_silence_secs),
        };

        let layout = MobileLayoutConfig {
            scale_factor: read(&lookup, "SHORTS_SCALE_FACTOR").unwrap_or(defaults.layout.scale_factor),
            ..defaults.layout
        };

        Self {
            output_dir: lookup("SHORTS_OUTPUT_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            segmentation,
            layout,
            detection,
            encoding: defaults.encoding,
            max_ffmpeg_processes: read(&lookup, "SHORTS_MAX_FFMPEG").unwrap_or(defaults.max_ffmpeg_processes),
            ffmpeg_timeout_secs: read::<u64>(&lookup, "SHORTS_FFMPEG_TIMEOUT")
                .filter(|secs| *secs > 0)
                .or(defaults.ffmpeg_timeout_secs),
            mobile: lookup("SHORTS_MOBILE")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.mobile),
        }
    }

    /// Reject settings no video could be processed with.
    pub fn validate(&self) -> WorkerResult<()> {
        self.segmentation
            .validate()
            .map_err(|e| WorkerError::config(e.to_string()))?;
        self.layout
            .validate()
            .map_err(|e| WorkerError::config(e.to_string()))?;

        let detection = &self.detection;
        if !(0.0..=1.0).contains(&detection.scene_threshold) {
            return Err(WorkerError::config(format!(
                "Scene threshold must be within 0.0-1.0, got {}",
                detection.scene_threshold
            )));
        }
        if !detection.silence_threshold_db.is_finite() {
            return Err(WorkerError::config(format!(
                "Silence threshold must be finite, got {}",
                detection.silence_threshold_db
            )));
        }
        if !detection.min_silence_secs.is_finite() || detection.min_silence_secs <= 0.0 {
            return Err(WorkerError::config(format!(
                "Minimum silence must be positive, got {}",
                detection.min_silence_secs
            )));
        }

        if self.max_ffmpeg_processes == 0 {
            return Err(WorkerError::config("At least one FFmpeg process is required"));
        }

        Ok(())
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|raw| raw.trim().parse().ok())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> WorkerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.segmentation, SegmentationConfig::default());
        assert_eq!(config.layout.scale_factor, 1.2);
        assert_eq!(config.detection.scene_threshold, 0.3);
        assert_eq!(config.detection.silence_threshold_db, -30.0);
        assert_eq!(config.max_ffmpeg_processes, 4);
        assert!(config.ffmpeg_timeout_secs.is_none());
        assert!(config.mobile);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = from_vars(&[
            ("SHORTS_MIN_DURATION", "30"),
            ("SHORTS_MAX_DURATION", " 90.5 "),
            ("SHORTS_SCALE_FACTOR", "1.5"),
            ("SHORTS_SILENCE_DB", "-40"),
            ("SHORTS_MAX_FFMPEG", "2"),
            ("SHORTS_FFMPEG_TIMEOUT", "600"),
            ("SHORTS_OUTPUT_DIR", "/data/shorts"),
            ("SHORTS_MOBILE", "off"),
        ]);

        assert_eq!(config.segmentation, SegmentationConfig::new(30.0, 90.5));
        assert_eq!(config.layout.scale_factor, 1.5);
        assert_eq!(config.detection.silence_threshold_db, -40.0);
        assert_eq!(config.max_ffmpeg_processes, 2);
        assert_eq!(config.ffmpeg_timeout_secs, Some(600));
        assert_eq!(config.output_dir, PathBuf::from("/data/shorts"));
        assert!(!config.mobile);
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = from_vars(&[
            ("SHORTS_MIN_DURATION", "a minute"),
            ("SHORTS_FFMPEG_TIMEOUT", "0"),
            ("SHORTS_MOBILE", "maybe"),
        ]);
        assert_eq!(config.segmentation.min_duration, 60.0);
        assert!(config.ffmpeg_timeout_secs.is_none());
        assert!(config.mobile);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = from_vars(&[("SHORTS_MIN_DURATION", "200")]);
        assert!(matches!(config.validate(), Err(WorkerError::Config(_))));

        let config = from_vars(&[("SHORTS_SCALE_FACTOR", "0.8")]);
        assert!(matches!(config.validate(), Err(WorkerError::Config(_))));

        let config = from_vars(&[("SHORTS_SCENE_THRESHOLD", "1.5")]);
        assert!(matches!(config.validate(), Err(WorkerError::Config(_))));

        let config = from_vars(&[("SHORTS_MAX_FFMPEG", "0")]);
        assert!(matches!(config.validate(), Err(WorkerError::Config(_))));
    }
}
