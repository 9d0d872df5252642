//! Main entry point for the ytgrab CLI

use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use ytgrab::cli::{Args, OutputFormatter};
use ytgrab::utils::filename::to_safe_filename;
use ytgrab::{Downloader, VideoSession};

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let formatter = OutputFormatter::new(args.verbosity_level());

    if let Err(err) = run(&args, &formatter) {
        formatter.error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args, formatter: &OutputFormatter) -> anyhow::Result<()> {
    let mut session = VideoSession::new();
    session
        .set_url(&args.url)
        .context("failed to resolve video metadata")?;
    info!("catalog populated with {} variant(s)", session.catalog().len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.catalog())?);
        return Ok(());
    }
    if args.list {
        formatter.print_catalog(session.catalog());
        return Ok(());
    }

    let filename = args
        .filename
        .clone()
        .unwrap_or_else(|| to_safe_filename(session.title()));
    session.set_filename(&filename);

    let resolution = args.resolution_filter();
    let variant = session
        .get(Some(&args.container), resolution.as_deref())
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "no variant matching container '{}'{}",
                args.container,
                resolution
                    .as_deref()
                    .map(|r| format!(" and resolution '{}'", r))
                    .unwrap_or_default()
            )
        })?;

    formatter.info(&format!("{} -> {}", session.title(), variant));

    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut downloader = Downloader::new().with_chunk_size(args.chunk_size);
    let progress_bar = if args.no_progress {
        None
    } else {
        Some(formatter.create_progress_bar())
    };
    if let Some(bar) = progress_bar.clone() {
        downloader = downloader.with_progress(move |progress| {
            OutputFormatter::update_progress(&bar, progress);
        });
    }

    let started = Instant::now();
    let path = downloader
        .download(&variant, &destination)
        .context("download failed")?;
    if let Some(bar) = &progress_bar {
        bar.finish_and_clear();
    }

    let bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    formatter.print_download_complete(&path, bytes, started.elapsed());
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
