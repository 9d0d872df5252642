//! Command line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Resolve a video page into downloadable variants and save one to disk
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video page URL
    pub url: String,

    /// Desired container (e.g. 'mp4', 'webm', 'flv')
    #[arg(short, long, value_name = "CONTAINER", default_value = "mp4")]
    pub container: String,

    /// Desired resolution (e.g. '720p'); unset picks the best match
    #[arg(short, long, value_name = "RES")]
    pub resolution: Option<String>,

    /// Destination directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override the output filename (minus extension)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Chunk size in bytes for buffered writes
    #[arg(long, value_name = "BYTES", default_value = "8192")]
    pub chunk_size: usize,

    /// List available variants and exit
    #[arg(short, long)]
    pub list: bool,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Resolution filter, normalized to lowercase.
    pub fn resolution_filter(&self) -> Option<String> {
        self.resolution.as_ref().map(|r| r.to_lowercase())
    }
}
