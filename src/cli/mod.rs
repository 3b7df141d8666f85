//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod info;
mod init;
mod play;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, SsbConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Sprite sheet builder - pack numbered frames into an atlas bundle
#[derive(Parser)]
#[command(name = "ssb")]
#[command(about = "Sprite sheet builder - pack numbered frames into an atlas bundle with playback metadata")]
#[command(version)]
pub struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this ssb.toml instead of searching for one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project file from a folder of numbered PNG frames
    Init {
        /// Folder containing the source frames
        source_folder: PathBuf,

        /// Sheet name (names the exported bundle)
        #[arg(long)]
        name: String,

        /// Project file to write (default: <name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grid columns
        #[arg(long)]
        cols: Option<u32>,

        /// Grid rows
        #[arg(long)]
        rows: Option<u32>,

        /// Tile size (e.g. --tile 64x64)
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        tile: Option<(u32, u32)>,
    },

    /// Show a project's grid, rows and sounds
    Info {
        /// Project file
        project: PathBuf,
    },

    /// Export a project to a bundle directory (and zip archive)
    Export {
        /// Project file
        project: PathBuf,

        /// Destination directory (default from ssb.toml, else "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the zip archive
        #[arg(long)]
        no_archive: bool,

        /// Write meta.json without indentation
        #[arg(long)]
        compact: bool,
    },

    /// Play a row of an exported bundle, printing frames and sound events
    Play {
        /// Bundle directory (contains meta.json)
        bundle: PathBuf,

        /// Row to play (default: first by name)
        #[arg(long)]
        row: Option<String>,

        /// Total playback time in milliseconds
        #[arg(long, default_value = "2000")]
        duration_ms: u64,

        /// Time step per advance in milliseconds
        #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..))]
        step_ms: u64,

        /// Sleep between steps to play in real time
        #[arg(long)]
        realtime: bool,
    },
}

/// Parse a "WxH" size string into (width, height).
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid size '{}', expected WxH (e.g., \"64x64\")", s));
    }
    let w: u32 = parts[0].trim().parse().map_err(|_| format!("invalid width '{}'", parts[0].trim()))?;
    let h: u32 =
        parts[1].trim().parse().map_err(|_| format!("invalid height '{}'", parts[1].trim()))?;
    if w == 0 || h == 0 {
        return Err(format!("size dimensions must be > 0, got {}x{}", w, h));
    }
    Ok((w, h))
}

/// Install the logger. `--verbose` raises the default filter to debug.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load ssb.toml (explicit path or discovered) and apply CLI overrides.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SsbConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { source_folder, name, output, cols, rows, tile } => {
            let overrides = CliOverrides { cols, rows, tile, ..Default::default() };
            init::run_init(&source_folder, &name, output.as_deref(), config, &overrides)
        }
        Commands::Info { project } => info::run_info(&project),
        Commands::Export { project, output, no_archive, compact } => {
            let overrides = CliOverrides {
                out: output,
                archive: no_archive.then_some(false),
                pretty: compact.then_some(false),
                ..Default::default()
            };
            export::run_export(&project, config, &overrides)
        }
        Commands::Play { bundle, row, duration_ms, step_ms, realtime } => {
            play::run_play(&bundle, row.as_deref(), duration_ms, step_ms, realtime)
        }
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
    fn test_parse_size() {
        assert_eq!(parse_size("64x32"), Ok((64, 32)));
        assert_eq!(parse_size(" 8 x 8 "), Ok((8, 8)));
        assert!(parse_size("64").is_err());
        assert!(parse_size("0x4").is_err());
        assert!(parse_size("ax4").is_err());
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::parse_from(["ssb", "export", "hero.json", "--no-archive", "-o", "out"]);
        match cli.command {
            Commands::Export { project, output, no_archive, compact } => {
                assert_eq!(project, PathBuf::from("hero.json"));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(no_archive);
                assert!(!compact);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_play_rejects_zero_step() {
        assert!(Cli::try_parse_from(["ssb", "play", "bundle", "--step-ms", "0"]).is_err());
    }
}
