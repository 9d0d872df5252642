//! Metadata fetching and decoding for a single video
//!
//! Issues the metadata request against the fixed endpoint, decodes the
//! form-encoded response, detects service-reported errors and turns the
//! embedded stream map into variant descriptors.

use crate::core::catalog::VariantDescriptor;
use crate::error::GrabError;
use crate::platform::{formats, stream_map};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Fixed metadata endpoint of the upstream service.
const VIDEO_INFO_URL: &str = "https://www.youtube.com/get_video_info";

const DEFAULT_ERROR_REASON: &str = "An unknown error has occurred";

fn itag_pattern() -> &'static Regex {
    static ITAG_RE: OnceLock<Regex> = OnceLock::new();
    ITAG_RE.get_or_init(|| Regex::new(r"itag=(\d+)").unwrap())
}

/// Fetches and decodes video metadata into a title and variant list.
pub struct VideoInfoFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl VideoInfoFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: VIDEO_INFO_URL.to_string(),
        }
    }

    /// Override the metadata endpoint. Used by tests.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Fetch the metadata for `video_id` and decode it into the video
    /// title and the ordered-insertion list of resolvable variants.
    ///
    /// Transport errors propagate immediately with no retry. Per-variant
    /// resolution failures never propagate; they reduce the list size.
    pub fn fetch(&self, video_id: &str) -> Result<(String, Vec<VariantDescriptor>), GrabError> {
        debug!("fetching video info for {}", video_id);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("asv", "3"),
                ("el", "detailpage"),
                ("hl", "en_US"),
                ("video_id", video_id),
            ])
            .send()?
            .error_for_status()?;
        let body = response.text()?;

        let data = parse_form(&body);

        if data.contains_key("errorcode") {
            let reason = data
                .get("reason")
                .and_then(|values| values.last().cloned())
                .unwrap_or_else(|| DEFAULT_ERROR_REASON.to_string());
            return Err(GrabError::ServiceReported(reason));
        }

        // The legacy endpoint served the title as ISO-8859-1 bytes; we
        // normalize to UTF-8 instead of reproducing that behavior.
        let title =
            traverse_path(&["title"], &body).ok_or(GrabError::MissingField("title"))?;

        let raw_map = data
            .get("url_encoded_fmt_stream_map")
            .and_then(|values| values.last())
            .ok_or(GrabError::MissingField("url_encoded_fmt_stream_map"))?;

        let segments = stream_map::decode(raw_map)?;
        let variants = build_variants(&segments, &title);

        debug!(
            "resolved {} of {} stream map segments for {}",
            variants.len(),
            segments.len(),
            video_id
        );
        Ok((title, variants))
    }
}

impl Default for VideoInfoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a form-encoded document into a key -> values multimap.
fn parse_form(body: &str) -> HashMap<String, Vec<String>> {
    let mut data: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        data.entry(key.into_owned()).or_default().push(value.into_owned());
    }
    data
}

/// Traverse a form-encoded document along `path`, re-decoding nested
/// values as form-encoded data and taking the last element wherever a key
/// repeats.
fn traverse_path(path: &[&str], data: &str) -> Option<String> {
    let (head, rest) = path.split_first()?;
    let value = parse_form(data).remove(*head)?.pop()?;
    if rest.is_empty() {
        Some(value)
    } else {
        traverse_path(rest, &value)
    }
}

/// Turn decoded stream-map segments into variant descriptors.
///
/// Each segment is self-contained: its url and signature are paired within
/// the segment, so a missing signature in one segment cannot shift the
/// signatures of the rest. Segments whose itag is unknown or unparseable
/// are skipped without failing the fetch.
fn build_variants(segments: &[stream_map::StreamSegment], title: &str) -> Vec<VariantDescriptor> {
    let mut variants = Vec::new();
    let mut skipped = 0usize;

    for segment in segments {
        let Some(url) = &segment.url else {
            debug!("skipping segment without url");
            skipped += 1;
            continue;
        };

        let Some(itag) = extract_itag(url, segment) else {
            debug!("skipping segment with unparseable itag: {}", url);
            skipped += 1;
            continue;
        };

        let Some(spec) = formats::resolve(itag) else {
            debug!("skipping segment with unknown itag {}", itag);
            skipped += 1;
            continue;
        };

        // A missing signature is tolerated; the URL simply carries none.
        let source_url = match &segment.sig {
            Some(sig) => format!("{}&signature={}", url, sig),
            None => url.clone(),
        };

        let mut variant = VariantDescriptor::from_spec(itag, source_url, spec);
        variant.display_filename = title.to_string();
        variants.push(variant);
    }

    if skipped > 0 {
        warn!("{} stream map segment(s) did not resolve to a variant", skipped);
    }
    variants
}

/// Recover the itag for a segment.
///
/// The media URL is scanned for an `itag=<digits>` parameter; exactly one
/// match wins, more than one is ambiguous and skips the segment. URLs
/// without an embedded itag fall back to the segment's own `itag` field.
fn extract_itag(url: &str, segment: &stream_map::StreamSegment) -> Option<u32> {
    let mut matches = itag_pattern().captures_iter(url);
    match (matches.next(), matches.next()) {
        (Some(capture), None) => capture[1].parse().ok(),
        (Some(_), Some(_)) => None,
        (None, _) => segment.itag.as_ref().and_then(|itag| itag.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::stream_map::StreamSegment;
    use mockito::Matcher;

    fn form_body(pairs: &[(&str, &str)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn fetcher_for(server: &mockito::ServerGuard) -> VideoInfoFetcher {
        VideoInfoFetcher::new().with_endpoint(&format!("{}/get_video_info", server.url()))
    }

    #[test]
    fn test_fetch_builds_sorted_variants() {
        let mut server = mockito::Server::new();
        let body = form_body(&[
            ("title", "Test Video"),
            (
                "url_encoded_fmt_stream_map",
                "itag=18&url=http%3A%2F%2Fa%3Fitag%3D18&sig=s18,\
                 itag=22&url=http%3A%2F%2Fb%3Fitag%3D22&sig=s22",
            ),
        ]);
        let mock = server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("asv".into(), "3".into()),
                Matcher::UrlEncoded("el".into(), "detailpage".into()),
                Matcher::UrlEncoded("hl".into(), "en_US".into()),
                Matcher::UrlEncoded("video_id".into(), "abc123".into()),
            ]))
            .with_body(body)
            .create();

        let (title, variants) = fetcher_for(&server).fetch("abc123").unwrap();
        mock.assert();

        assert_eq!(title, "Test Video");
        assert_eq!(variants.len(), 2);
        // 720p before 360p within the same container.
        assert_eq!(variants[0].itag, 22);
        assert!(variants[0].source_url.ends_with("&signature=s22"));
        assert_eq!(variants[1].itag, 18);
        assert!(variants.iter().all(|v| v.display_filename == "Test Video"));
    }

    #[test]
    fn test_fetch_service_reported_error_uses_last_reason() {
        let mut server = mockito::Server::new();
        let body = "status=fail&errorcode=150&reason=first&reason=Video+unavailable";
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body(body)
            .create();

        let err = fetcher_for(&server).fetch("abc123").unwrap_err();
        match err {
            GrabError::ServiceReported(reason) => assert_eq!(reason, "Video unavailable"),
            other => panic!("expected ServiceReported, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_service_error_without_reason_uses_default() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body("errorcode=2")
            .create();

        let err = fetcher_for(&server).fetch("abc123").unwrap_err();
        match err {
            GrabError::ServiceReported(reason) => assert_eq!(reason, DEFAULT_ERROR_REASON),
            other => panic!("expected ServiceReported, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_unknown_itag_yields_no_variants() {
        let mut server = mockito::Server::new();
        let body = form_body(&[
            ("title", "Test Video"),
            ("url_encoded_fmt_stream_map", "itag=9999&url=http%3A%2F%2Fx"),
        ]);
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body(body)
            .create();

        let (_, variants) = fetcher_for(&server).fetch("abc123").unwrap();
        assert!(variants.is_empty());
    }

    #[test]
    fn test_fetch_malformed_stream_map_is_fatal() {
        let mut server = mockito::Server::new();
        let body = form_body(&[
            ("title", "Test Video"),
            ("url_encoded_fmt_stream_map", "itag18&url=http%3A%2F%2Fx"),
        ]);
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body(body)
            .create();

        let err = fetcher_for(&server).fetch("abc123").unwrap_err();
        assert!(matches!(err, GrabError::MalformedStreamMap(_)));
    }

    #[test]
    fn test_fetch_missing_title_is_fatal() {
        let mut server = mockito::Server::new();
        let body = form_body(&[(
            "url_encoded_fmt_stream_map",
            "itag=18&url=http%3A%2F%2Fx",
        )]);
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body(body)
            .create();

        let err = fetcher_for(&server).fetch("abc123").unwrap_err();
        assert!(matches!(err, GrabError::MissingField("title")));
    }

    #[test]
    fn test_fetch_missing_stream_map_is_fatal() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/get_video_info")
            .match_query(Matcher::Any)
            .with_body("title=Test+Video")
            .create();

        let err = fetcher_for(&server).fetch("abc123").unwrap_err();
        assert!(matches!(
            err,
            GrabError::MissingField("url_encoded_fmt_stream_map")
        ));
    }

    #[test]
    fn test_build_variants_signed_segment() {
        // itag=18&url=http%3A%2F%2Fx&sig=abc -> exactly one mp4/360p
        // variant whose URL carries the signature.
        let segments = stream_map::decode("itag=18&url=http%3A%2F%2Fx&sig=abc").unwrap();
        let variants = build_variants(&segments, "t");

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].container, "mp4");
        assert_eq!(variants[0].resolution, "360p");
        assert!(variants[0].source_url.ends_with("&signature=abc"));
    }

    #[test]
    fn test_build_variants_missing_signature_is_tolerated() {
        let segments = stream_map::decode("itag=22&url=http%3A%2F%2Fb").unwrap();
        let variants = build_variants(&segments, "t");

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].source_url, "http://b");
        assert!(!variants[0].source_url.contains("signature"));
    }

    #[test]
    fn test_extract_itag_prefers_url_scan() {
        let segment = StreamSegment {
            itag: Some("22".to_string()),
            ..Default::default()
        };
        // URL parameter wins over the segment field.
        assert_eq!(extract_itag("http://a?itag=18", &segment), Some(18));
        // No URL match falls back to the segment field.
        assert_eq!(extract_itag("http://a", &segment), Some(22));
        // Ambiguous URL matches skip the segment.
        assert_eq!(extract_itag("http://a?itag=18&itag=22", &segment), None);
    }

    #[test]
    fn test_traverse_path_takes_last_repeated_value() {
        assert_eq!(
            traverse_path(&["title"], "title=first&title=second").as_deref(),
            Some("second")
        );
        assert_eq!(traverse_path(&["title"], "other=x"), None);
    }

    #[test]
    fn test_traverse_path_nested() {
        // Nested form-encoded value is re-decoded along the path.
        let inner = "title=Nested+Title";
        let body = form_body(&[("player_response", inner)]);
        assert_eq!(
            traverse_path(&["player_response", "title"], &body).as_deref(),
            Some("Nested Title")
        );
    }

    #[test]
    fn test_parse_form_collects_repeated_keys() {
        let data = parse_form("a=1&a=2&b=3");
        assert_eq!(data["a"], vec!["1", "2"]);
        assert_eq!(data["b"], vec!["3"]);
    }
}
