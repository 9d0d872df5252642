//! Upstream service protocol: metadata decoding and the format table

pub mod formats;
pub mod stream_map;
pub mod video_info;

pub use stream_map::*;
pub use video_info::*;
