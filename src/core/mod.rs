//! Core functionality for ytgrab

pub mod catalog;
pub mod progress;
pub mod session;

pub use catalog::*;
pub use progress::*;
pub use session::*;
