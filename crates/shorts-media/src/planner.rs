//! Cut-point selection.
//!
//! Scene changes and silence starts are merged into one sorted candidate
//! list (plus `0` and the video end) and walked left to right:
//!
//! - a candidate closer than `min_duration` to the current start is skipped
//! - a candidate within `[min_duration, max_duration]` closes a segment
//! - a candidate past `max_duration` forces a split at the candidate nearest
//!   to `current_start + max_duration`, or at that exact point if no
//!   candidate lies in range
//!
//! Whatever remains after the last candidate becomes a final segment if it
//! is at least `min_duration` long. That trailing segment is not capped.
//!
//! A forced split can only land on a candidate that was skipped as too
//! close, so the segment it closes may be shorter than `min_duration`.

use tracing::debug;

use shorts_models::{PlanError, Segment, SegmentationConfig};

/// Plan segments for a video of `duration` seconds.
///
/// Candidate lists may be empty, unsorted or contain duplicates.
/// Non-finite timestamps and timestamps outside `[0, duration]` are ignored.
/// An empty result means no stretch of the video satisfies the minimum.
pub fn plan_segments(
    duration: f64,
    scene_times: &[f64],
    silence_times: &[f64],
    config: &SegmentationConfig,
) -> Result<Vec<Segment>, PlanError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(PlanError::InvalidDuration(duration));
    }
    config.validate()?;

    let SegmentationConfig {
        min_duration,
        max_duration,
    } = *config;

    let cuts = candidate_cuts(duration, scene_times, silence_times);
    let mut segments = Vec::new();
    let mut current_start = 0.0;

    for &cut_point in &cuts[1..] {
        let length = cut_point - current_start;

        if length < min_duration {
            continue;
        }

        let end = if length > max_duration {
            let chosen = split_point(&cuts, current_start, max_duration);
            debug!(
                current_start,
                overrun = cut_point,
                chosen,
                "Splitting overlong segment"
            );
            chosen
        } else {
            cut_point
        };

        segments.push(Segment::new(current_start, end));
        current_start = end;
    }

    let remainder = duration - current_start;
    if remainder >= min_duration {
        segments.push(Segment::new(current_start, duration));
    } else if remainder > 0.0 {
        debug!(
            start = current_start,
            remainder, min_duration, "Dropping trailing remainder shorter than minimum"
        );
    }

    Ok(segments)
}

/// Scalar-argument form of [`plan_segments`].
pub fn plan(
    duration: f64,
    scene_times: &[f64],
    silence_times: &[f64],
    min_duration: f64,
    max_duration: f64,
) -> Result<Vec<Segment>, PlanError> {
    plan_segments(
        duration,
        scene_times,
        silence_times,
        &SegmentationConfig::new(min_duration, max_duration),
    )
}

/// Sorted, deduplicated candidates including both ends of the video.
fn candidate_cuts(duration: f64, scene_times: &[f64], silence_times: &[f64]) -> Vec<f64> {
    let mut cuts: Vec<f64> = scene_times
        .iter()
        .chain(silence_times)
        .copied()
        .filter(|t| t.is_finite() && (0.0..=duration).contains(t))
        .chain([0.0, duration])
        .collect();

    cuts.sort_by(f64::total_cmp);
    // -0.0 and 0.0 compare equal, so one zero survives
    cuts.dedup_by(|a, b| a == b);
    cuts
}

/// Candidate in `(start, start + max_duration]` nearest to `start + max_duration`.
///
/// Every candidate in range is at or below the target, so the nearest one
/// is the largest. Falls back to the target itself when the range is empty.
fn split_point(cuts: &[f64], start: f64, max_duration: f64) -> f64 {
    let target = start + max_duration;
    let lo = cuts.partition_point(|&c| c <= start);
    let hi = cuts.partition_point(|&c| c <= target);

    if lo < hi {
        cuts[hi - 1]
    } else {
        target
    }
}
