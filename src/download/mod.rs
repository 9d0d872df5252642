//! Download system for ytgrab

pub mod downloader;

pub use downloader::*;
