//! Utility functions for ytgrab

pub mod filename;
pub mod url;

pub use filename::*;
pub use url::*;
