//! Shorts worker binary.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shorts_media::{check_ffmpeg, check_ffprobe, FfmpegToolkit};
use shorts_worker::{find_videos, metrics, run_batch, Cli, ShortsPipeline, WorkerConfig, WorkerError};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Colored output for terminals, JSON for log collectors
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "shorts=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting shorts-worker");

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the run should exit successfully.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    if let Some(addr) = metrics::init_from_env()? {
        info!(%addr, "Serving Prometheus metrics");
    }

    let config = cli.apply(WorkerConfig::from_env());
    config.validate()?;
    info!("Worker config: {:?}", config);

    let ffmpeg = check_ffmpeg().context("FFmpeg is required")?;
    let ffprobe = check_ffprobe().context("FFprobe is required")?;
    info!(ffmpeg = %ffmpeg.display(), ffprobe = %ffprobe.display(), "Found media tools");

    let videos = match find_videos(&cli.input).await {
        Ok(videos) => videos,
        Err(WorkerError::NoVideos(dir)) => {
            warn!(input = %dir.display(), "No supported video files found, nothing to do");
            return Ok(true);
        }
        Err(e) => return Err(e.into()),
    };

    let toolkit = FfmpegToolkit::new()
        .with_timeout(config.ffmpeg_timeout_secs)
        .with_encoding(config.encoding.clone());
    let summary_path = cli
        .summary
        .clone()
        .unwrap_or_else(|| config.output_dir.join("summary.json"));
    let pipeline = ShortsPipeline::new(toolkit, config);

    let summary = run_batch(&pipeline, &cli.input, &videos).await?;
    summary.log();

    if let Err(e) = summary.write_json(&summary_path).await {
        warn!(path = %summary_path.display(), error = %e, "Failed to write run summary");
    } else {
        info!(path = %summary_path.display(), "Wrote run summary");
    }

    Ok(summary.is_success())
}
