//! Decoding of the doubly-encoded stream map field
//!
//! The stream map arrives as the value of one form-encoded response field:
//! a comma-separated list of ampersand-joined `key=value` segments, each
//! value additionally percent-encoded. One segment describes one variant.

use crate::error::GrabError;
use percent_encoding::percent_decode_str;

/// Decoded attributes of one stream-map segment.
///
/// Keys absent from a segment stay `None`; the url and signature of a
/// variant are paired within the segment they arrived in, never matched
/// up by position across segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSegment {
    pub itag: Option<String>,
    pub url: Option<String>,
    pub quality: Option<String>,
    pub fallback_host: Option<String>,
    pub sig: Option<String>,
    pub media_type: Option<String>,
}

/// Decode a raw stream-map value into per-segment attribute records.
///
/// Splits on `,` for segments, `&` for pairs, and the first `=` within a
/// pair; values are percent-decoded. Unrecognized keys are ignored. A pair
/// with no `=` is a hard parse error.
pub fn decode(raw: &str) -> Result<Vec<StreamSegment>, GrabError> {
    raw.split(',').map(decode_segment).collect()
}

fn decode_segment(segment: &str) -> Result<StreamSegment, GrabError> {
    let mut decoded = StreamSegment::default();

    for pair in segment.split('&') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| GrabError::MalformedStreamMap(pair.to_string()))?;

        let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
        match key {
            "itag" => decoded.itag = Some(value),
            "url" => decoded.url = Some(value),
            "quality" => decoded.quality = Some(value),
            "fallback_host" => decoded.fallback_host = Some(value),
            "sig" => decoded.sig = Some(value),
            "type" => decoded.media_type = Some(value),
            _ => {}
        }
    }

    Ok(decoded)
}
