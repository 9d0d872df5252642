//! # ytgrab - video variant resolver and downloader
//!
//! Resolves a video page URL into the set of downloadable media variants
//! (container/codec/resolution/bitrate combinations) advertised by the
//! hosting service, and streams a chosen variant to local storage.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ytgrab::{Downloader, VideoSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = VideoSession::new();
//!     session.set_url("https://www.youtube.com/watch?v=VIDEO_ID")?;
//!
//!     let variant = session
//!         .get(Some("mp4"), None)
//!         .ok_or("no mp4 variant available")?;
//!
//!     let path = Downloader::new().download(variant, std::path::Path::new("."))?;
//!     println!("saved to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{Progress, VariantCatalog, VariantDescriptor, VideoSession};
pub use crate::download::Downloader;
pub use crate::error::GrabError;
pub use crate::platform::VideoInfoFetcher;

/// Result type alias for ytgrab operations
pub type Result<T> = std::result::Result<T, GrabError>;
