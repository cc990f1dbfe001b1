//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::WorkerConfig;

/// Cut videos into vertical shorts at scene changes and silence pauses
#[derive(Parser, Debug)]
#[command(name = "shorts-worker", author, version, about, long_about = None)]
pub struct Cli {
    /// Video file, or folder searched recursively for videos
    pub input: PathBuf,

    /// Output folder; each video gets its own subfolder
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum short length in seconds
    #[arg(long)]
    pub min_duration: Option<f64>,

    /// Maximum short length in seconds
    #[arg(long)]
    pub max_duration: Option<f64>,

    /// Foreground width as a multiple of the canvas width
    #[arg(long)]
    pub scale_factor: Option<f64>,

    /// Scene change threshold (0.0-1.0)
    #[arg(long)]
    pub scene_threshold: Option<f64>,

    /// Silence noise floor in dB
    #[arg(long, allow_hyphen_values = true)]
    pub silence_db: Option<f64>,

    /// Minimum silence length in seconds
    #[arg(long)]
    pub min_silence: Option<f64>,

    /// Concurrent FFmpeg processes per video
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Keep original-aspect cuts instead of 9:16 composites
    #[arg(long)]
    pub no_mobile: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over `config`.
    pub fn apply(&self, mut config: WorkerConfig) -> WorkerConfig {
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(min) = self.min_duration {
            config.segmentation.min_duration = min;
        }
        if let Some(max) = self.max_duration {
            config.segmentation.max_duration = max;
        }
        if let Some(scale) = self.scale_factor {
            config.layout.scale_factor = scale;
        }
        if let Some(threshold) = self.scene_threshold {
            config.detection.scene_threshold = threshold;
        }
        if let Some(db) = self.silence_db {
            config.detection.silence_threshold_db = db;
        }
        if let Some(secs) = self.min_silence {
            config.detection.min_silence_secs = secs;
        }
        if let Some(jobs) = self.jobs {
            config.max_ffmpeg_processes = jobs;
        }
        if self.no_mobile {
            config.mobile = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "shorts-worker",
            "videos/",
            "-o",
            "out",
            "--min-duration",
            "30",
            "--max-duration",
            "90",
            "--silence-db",
            "-35",
            "--jobs",
            "2",
            "--no-mobile",
        ])
        .unwrap();

        let config = cli.apply(WorkerConfig::default());
        assert_eq!(cli.input, PathBuf::from("videos/"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.segmentation.min_duration, 30.0);
        assert_eq!(config.segmentation.max_duration, 90.0);
        assert_eq!(config.detection.silence_threshold_db, -35.0);
        assert_eq!(config.max_ffmpeg_processes, 2);
        assert!(!config.mobile);
        assert!(cli.summary.is_none());
    }

    #[test]
    fn test_defaults_are_kept() {
        let cli = Cli::try_parse_from(["shorts-worker", "talk.mp4"]).unwrap();
        let config = cli.apply(WorkerConfig::default());
        assert_eq!(config.segmentation.min_duration, 60.0);
        assert_eq!(config.layout.scale_factor, 1.2);
        assert!(config.mobile);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["shorts-worker"]).is_err());
    }
}
