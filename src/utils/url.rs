//! Page URL parsing

use crate::error::GrabError;
use url::Url;

/// Extract the video ID from a watch page URL.
pub fn extract_video_id(page_url: &str) -> Result<String, GrabError> {
    let parsed = Url::parse(page_url)
        .map_err(|e| GrabError::InvalidUrl(format!("{}: {}", page_url, e)))?;

    match parsed.host_str() {
        Some("youtu.be") => {
            let id = parsed.path().trim_start_matches('/');
            if id.is_empty() {
                return Err(GrabError::InvalidUrl("missing video ID".to_string()));
            }
            Ok(id.to_string())
        }
        Some("youtube.com") | Some("www.youtube.com") => {
            if !parsed.path().starts_with("/watch") {
                return Err(GrabError::InvalidUrl(
                    "unsupported video URL format".to_string(),
                ));
            }
            parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.to_string())
                .ok_or_else(|| GrabError::InvalidUrl("missing v parameter".to_string()))
        }
        _ => Err(GrabError::InvalidUrl(
            "not a supported video page URL".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_watch_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=dQw4w9WgXcQ&t=10s").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_short_urls() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=10").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_errors() {
        assert!(extract_video_id("https://www.youtube.com/watch").is_err());
        assert!(extract_video_id("https://youtu.be/").is_err());
        assert!(extract_video_id("https://www.youtube.com/channel/UCx").is_err());
        assert!(extract_video_id("https://example.com").is_err());
        assert!(extract_video_id("not-a-url").is_err());
    }
}
