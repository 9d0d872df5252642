//! Output formatting and progress display

use crate::cli::args::VerbosityLevel;
use crate::core::catalog::VariantCatalog;
use crate::core::progress::{format_bytes, Progress};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output formatter for ytgrab
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
}

impl OutputFormatter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Create a progress bar for a download; hidden when quiet.
    pub fn create_progress_bar(&self) -> ProgressBar {
        if self.verbosity == VerbosityLevel::Quiet {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-");

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(style);
        progress_bar
    }

    /// Drive a progress bar from a download progress update.
    pub fn update_progress(progress_bar: &ProgressBar, progress: &Progress) {
        if progress_bar.length() != Some(progress.total_bytes) {
            progress_bar.set_length(progress.total_bytes);
        }
        progress_bar.set_position(progress.received_bytes);
    }

    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("{} {}", "ok:".green().bold(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Print the catalog: title plus one line per variant.
    pub fn print_catalog(&self, catalog: &VariantCatalog) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!("{}", catalog.title.bold());
        println!("{} variant(s) available", catalog.len());
        for variant in catalog.variants() {
            println!(
                "  itag={:<4} {:<5} {:<6} {} {} (audio: {} {} kbps)",
                variant.itag.to_string().cyan(),
                variant.container,
                variant.resolution,
                variant.video_codec,
                variant.video_profile,
                variant.audio_codec,
                variant.audio_bitrate,
            );
        }
    }

    pub fn print_download_complete(&self, path: &std::path::Path, bytes: u64, elapsed: Duration) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }
        println!();
        self.success(&format!(
            "saved {} ({}) in {:.1}s",
            path.display(),
            format_bytes(bytes),
            elapsed.as_secs_f64()
        ));
    }
}
