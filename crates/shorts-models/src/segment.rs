//! Planned segments and the duration bounds that shape them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum short length in seconds.
pub const DEFAULT_MIN_DURATION: f64 = 60.0;
/// Default maximum short length in seconds.
pub const DEFAULT_MAX_DURATION: f64 = 180.0;

/// Invalid input handed to the segment planner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Video duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("Minimum segment duration must be positive, got {0}")]
    InvalidMinDuration(f64),

    #[error("Minimum duration {min} must be below maximum duration {max}")]
    InvertedBounds { min: f64, max: f64 },
}

/// A contiguous time range of the source video, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `other` starts at or after the end of this segment.
    pub fn precedes(&self, other: &Segment) -> bool {
        self.end <= other.start
    }
}

impl From<(f64, f64)> for Segment {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

/// Duration bounds for planned segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Shortest segment worth emitting, in seconds.
    #[serde(default = "default_min_duration")]
    pub min_duration: f64,

    /// Longest segment before a forced split, in seconds.
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,
}

fn default_min_duration() -> f64 {
    DEFAULT_MIN_DURATION
}
fn default_max_duration() -> f64 {
    DEFAULT_MAX_DURATION
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

impl SegmentationConfig {
    pub fn new(min_duration: f64, max_duration: f64) -> Self {
        Self {
            min_duration,
            max_duration,
        }
    }

    /// Check `0 < min_duration < max_duration`.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.min_duration.is_finite() || self.min_duration <= 0.0 {
            return Err(PlanError::InvalidMinDuration(self.min_duration));
        }
        if !self.max_duration.is_finite() || self.min_duration >= self.max_duration {
            return Err(PlanError::InvertedBounds {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = SegmentationConfig::default();
        assert_eq!(config.min_duration, 60.0);
        assert_eq!(config.max_duration, 180.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bounds() {
        assert_eq!(
            SegmentationConfig::new(0.0, 10.0).validate(),
            Err(PlanError::InvalidMinDuration(0.0))
        );
        assert_eq!(
            SegmentationConfig::new(90.0, 90.0).validate(),
            Err(PlanError::InvertedBounds { min: 90.0, max: 90.0 })
        );
        assert!(SegmentationConfig::new(f64::NAN, 90.0).validate().is_err());
    }

    #[test]
    fn test_segment_duration() {
        let segment = Segment::from((100.0, 250.0));
        assert_eq!(segment.duration(), 150.0);
        assert!(segment.precedes(&Segment::new(250.0, 400.0)));
        assert!(!segment.precedes(&Segment::new(200.0, 400.0)));
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: SegmentationConfig = serde_json::from_str(r#"{"min_duration": 30}"#).unwrap();
        assert_eq!(config.min_duration, 30.0);
        assert_eq!(config.max_duration, DEFAULT_MAX_DURATION);
    }
}
