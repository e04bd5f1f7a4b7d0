//! Command-line interface for the asset tools.
//!
//! Every subcommand is one independent, run-once utility:
//!
//! - `convert-wav` — PCM WAV to 16-bit mono
//! - `templates` — coloring-book line-art set
//! - `click-track` — metronome click WAV
//! - `pastel` — pastel placeholder sprite/background batch
//! - `generate` — manifest assets via the synchronous run endpoint
//! - `generate-queue` — manifest assets via the queue API
//! - `tts` — batch speech clips with Piper

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use asset_tools::PipelineError;

/// Offline asset-preparation tools for the game content pipeline.
#[derive(Parser, Debug)]
#[command(name = "asset-tools")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a PCM WAV file to 16-bit mono
    ConvertWav {
        /// Input WAV (8/16/24/32-bit integer PCM)
        input: PathBuf,
        /// Output WAV (16-bit mono, sample rate preserved)
        output: PathBuf,
    },

    /// Draw the coloring-book template set
    Templates {
        /// Directory the PNG templates are written into
        #[arg(short, long, default_value = "assets/textures/coloring_templates")]
        out_dir: PathBuf,
    },

    /// Synthesize a metronome click track
    ClickTrack {
        /// Output WAV path
        #[arg(short, long)]
        out: PathBuf,

        /// Number of clicks
        #[arg(short, long)]
        beats: u32,

        /// Seconds between clicks
        #[arg(short, long, default_value_t = 1.0)]
        interval: f64,

        /// Trailing silence in seconds
        #[arg(short, long, default_value_t = 2.0)]
        tail: f64,

        /// Lead-in silence before the first click
        #[arg(long, default_value_t = 0.5)]
        start_offset: f64,
    },

    /// Draw the pastel placeholder sprite/background batch
    Pastel {
        /// Root directory the per-game folders are written into
        #[arg(short, long, default_value = "assets/textures/games")]
        out_dir: PathBuf,
    },

    /// Generate manifest assets via the synchronous run endpoint
    Generate {
        /// Manifest JSON describing the jobs
        #[arg(short, long)]
        manifest: PathBuf,

        /// Restrict the run to these asset ids (default: all)
        ids: Vec<String>,
    },

    /// Generate manifest assets via the queue API (submit + poll)
    GenerateQueue {
        /// Manifest JSON describing the jobs
        #[arg(short, long)]
        manifest: PathBuf,

        /// Restrict the run to these asset ids (default: all)
        ids: Vec<String>,

        /// Per-job completion deadline in seconds
        #[arg(long, default_value_t = 900)]
        timeout: u64,
    },

    /// Batch-synthesize speech clips with Piper
    Tts {
        /// Output folder
        #[arg(short, long)]
        out: PathBuf,

        /// Piper binary
        #[arg(long, default_value = "tools/tts/piper/piper")]
        piper: PathBuf,

        /// Voice model (.onnx)
        #[arg(long)]
        model: PathBuf,

        /// Text lines, one clip each
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

/// Execute the parsed CLI.
pub async fn execute(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Commands::ConvertWav { input, output } => commands::cmd_convert_wav(&input, &output),
        Commands::Templates { out_dir } => commands::cmd_templates(&out_dir),
        Commands::ClickTrack {
            out,
            beats,
            interval,
            tail,
            start_offset,
        } => commands::cmd_click_track(&out, beats, interval, tail, start_offset),
        Commands::Pastel { out_dir } => commands::cmd_pastel(&out_dir),
        Commands::Generate { manifest, ids } => commands::cmd_generate(&manifest, &ids).await,
        Commands::GenerateQueue {
            manifest,
            ids,
            timeout,
        } => commands::cmd_generate_queue(&manifest, &ids, timeout).await,
        Commands::Tts {
            out,
            piper,
            model,
            lines,
        } => commands::cmd_tts(&out, &piper, &model, &lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn click_track_defaults() {
        let cli = Cli::parse_from(["asset-tools", "click-track", "--out", "c.wav", "--beats", "8"]);
        match cli.command {
            Commands::ClickTrack {
                beats,
                interval,
                tail,
                start_offset,
                ..
            } => {
                assert_eq!(beats, 8);
                assert!((interval - 1.0).abs() < 1e-12);
                assert!((tail - 2.0).abs() < 1e-12);
                assert!((start_offset - 0.5).abs() < 1e-12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn generate_queue_accepts_id_filter() {
        let cli = Cli::parse_from([
            "asset-tools",
            "generate-queue",
            "--manifest",
            "m.json",
            "icon_a",
            "bg_b",
        ]);
        match cli.command {
            Commands::GenerateQueue { ids, timeout, .. } => {
                assert_eq!(ids, vec!["icon_a".to_string(), "bg_b".to_string()]);
                assert_eq!(timeout, 900);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
