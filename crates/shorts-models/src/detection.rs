//! Scene and silence detection settings.

use serde::{Deserialize, Serialize};

/// Frame difference above which ffmpeg's `scene` score marks a shot change.
pub const DEFAULT_SCENE_THRESHOLD: f64 = 0.3;
/// Loudness below which audio counts as silent, in dB.
pub const DEFAULT_SILENCE_THRESHOLD_DB: f64 = -30.0;
/// Minimum length of a silent stretch, in seconds.
pub const DEFAULT_MIN_SILENCE_SECS: f64 = 1.0;

/// Parameters passed to the scene and silence detectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Scene score threshold (0.0-1.0) for `select='gt(scene,T)'`.
    ///
    /// - Lower values (0.1-0.2): many candidates, including camera pans
    /// - Default (0.3): hard cuts and strong transitions
    /// - Higher values (0.5+): only very abrupt cuts
    #[serde(default = "default_scene_threshold")]
    pub scene_threshold: f64,

    /// Noise floor for `silencedetect`, in dB.
    #[serde(default = "default_silence_threshold_db")]
    pub silence_threshold_db: f64,

    /// Minimum silence length for `silencedetect`, in seconds.
    #[serde(default = "default_min_silence_secs")]
    pub min_silence_secs: f64,
}

fn default_scene_threshold() -> f64 {
    DEFAULT_SCENE_THRESHOLD
}
fn default_silence_threshold_db() -> f64 {
    DEFAULT_SILENCE_THRESHOLD_DB
}
fn default_min_silence_secs() -> f64 {
    DEFAULT_MIN_SILENCE_SECS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            scene_threshold: DEFAULT_SCENE_THRESHOLD,
            silence_threshold_db: DEFAULT_SILENCE_THRESHOLD_DB,
            min_silence_secs: DEFAULT_MIN_SILENCE_SECS,
        }
    }
}

impl DetectionConfig {
    /// Builder-style setter for the scene threshold.
    pub fn with_scene_threshold(mut self, threshold: f64) -> Self {
        self.scene_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the silence noise floor.
    pub fn with_silence_threshold_db(mut self, db: f64) -> Self {
        self.silence_threshold_db = db;
        self
    }

    /// Builder-style setter for the minimum silence length.
    pub fn with_min_silence_secs(mut self, secs: f64) -> Self {
        self.min_silence_secs = secs.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert!((config.scene_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.silence_threshold_db, -30.0);
        assert_eq!(config.min_silence_secs, 1.0);
    }

    #[test]
    fn test_builder_clamping() {
        let config = DetectionConfig::default()
            .with_scene_threshold(1.5)
            .with_min_silence_secs(-2.0)
            .with_silence_threshold_db(-45.0);

        assert_eq!(config.scene_threshold, 1.0);
        assert_eq!(config.min_silence_secs, 0.0);
        assert_eq!(config.silence_threshold_db, -45.0);
    }
}
