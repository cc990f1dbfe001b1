//! Prometheus metrics for batch runs.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::{WorkerError, WorkerResult};
use crate::report::{SegmentOutcome, VideoStatus};

/// Metric names as constants for consistency.
pub mod names {
    pub const SEGMENTS_TOTAL: &str = "shorts_segments_total";
    pub const VIDEOS_TOTAL: &str = "shorts_videos_total";
    pub use shorts_media::toolkit::FFMPEG_DURATION_SECONDS;
}

/// Serve `/metrics` on `addr` for the lifetime of the process.
///
/// Must be called from within a tokio runtime.
pub fn install_exporter(addr: SocketAddr) -> WorkerResult<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| WorkerError::config(format!("Failed to start metrics exporter on {addr}: {e}")))
}

/// Install the exporter when `METRICS_ADDR` is set.
pub fn init_from_env() -> WorkerResult<Option<SocketAddr>> {
    let Some(raw) = std::env::var("METRICS_ADDR").ok().filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };

    let addr: SocketAddr = raw
        .trim()
        .parse()
        .map_err(|e| WorkerError::config(format!("Invalid METRICS_ADDR '{raw}': {e}")))?;
    install_exporter(addr)?;
    Ok(Some(addr))
}

/// Record one rendered (or failed) segment.
pub fn record_segment(outcome: SegmentOutcome) {
    let labels = [("outcome", outcome.as_str().to_string())];
    counter!(names::SEGMENTS_TOTAL, &labels).increment(1);
}

/// Record one finished video.
pub fn record_video(status: VideoStatus) {
    let labels = [("status", status.as_str().to_string())];
    counter!(names::VIDEOS_TOTAL, &labels).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_segment(SegmentOutcome::Mobile);
        record_video(VideoStatus::NoSegments);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(names::SEGMENTS_TOTAL, "shorts_segments_total");
        assert_eq!(names::FFMPEG_DURATION_SECONDS, "shorts_ffmpeg_duration_seconds");
    }
}
