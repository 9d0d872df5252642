//! Command line interface for ytgrab

pub mod args;
pub mod output;

pub use args::Args;
pub use output::OutputFormatter;
