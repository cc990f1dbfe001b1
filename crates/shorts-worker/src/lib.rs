//! Shorts batch worker.
//!
//! This crate provides:
//! - Configuration from `SHORTS_*` environment variables and CLI flags
//! - The per-video pipeline with its fallback policy
//! - A sequential batch runner over files and folders
//! - Run summaries, structured logging and metrics

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod testing;

pub use batch::{find_videos, run_batch};
pub use cli::Cli;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::VideoLogger;
pub use pipeline::ShortsPipeline;
pub use report::{BatchSummary, SegmentOutcome, VideoReport, VideoStatus};
