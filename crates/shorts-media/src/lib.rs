//! Cut-point planning, mobile layout geometry and FFmpeg CLI wrappers.
//!
//! This crate provides:
//! - The segment planner (scene + silence candidates under min/max bounds)
//! - The 9:16 blurred-background layout calculator and its filter graph
//! - Type-safe FFmpeg command building with timeouts and progress parsing
//! - FFprobe inspection, scene/silence detection, lossless cutting and
//!   mobile compositing
//! - Collaborator traits so orchestration can run against fakes

pub mod clip;
pub mod command;
pub mod detect;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod layout;
pub mod mobile;
pub mod planner;
pub mod probe;
pub mod progress;
pub mod toolkit;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::build_mobile_filter;
pub use layout::{compute, compute_layout};
pub use planner::{plan, plan_segments};
pub use probe::probe_video;
pub use progress::FfmpegProgress;
pub use toolkit::{CutDetector, FfmpegToolkit, MediaInspector, SegmentRenderer};
