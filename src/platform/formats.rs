//! Static itag format table and resolution of itags into variant attributes

/// Fixed attributes of one upstream encoding, keyed by itag.
///
/// The table is a versioned fact about the upstream service (source:
/// the published quality/codec map), kept in sync with it as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub container: &'static str,
    pub resolution: &'static str,
    pub video_codec: &'static str,
    pub video_profile: &'static str,
    pub video_bitrate: &'static str,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
}

const fn spec(
    container: &'static str,
    resolution: &'static str,
    video_codec: &'static str,
    video_profile: &'static str,
    video_bitrate: &'static str,
    audio_codec: &'static str,
    audio_bitrate: &'static str,
) -> FormatSpec {
    FormatSpec {
        container,
        resolution,
        video_codec,
        video_profile,
        video_bitrate,
        audio_codec,
        audio_bitrate,
    }
}

/// itag -> format attributes, never mutated at runtime.
static FORMAT_TABLE: &[(u32, FormatSpec)] = &[
    // Flash Video
    (5, spec("flv", "240p", "Sorenson H.263", "N/A", "0.25", "MP3", "64")),
    (6, spec("flv", "270p", "Sorenson H.263", "N/A", "0.8", "MP3", "64")),
    (34, spec("flv", "360p", "H.264", "Main", "0.5", "AAC", "128")),
    (35, spec("flv", "480p", "H.264", "Main", "0.8-1", "AAC", "128")),
    // 3GP
    (36, spec("3gp", "240p", "MPEG-4 Visual", "Simple", "0.17", "AAC", "38")),
    (13, spec("3gp", "N/A", "MPEG-4 Visual", "N/A", "0.5", "AAC", "N/A")),
    (17, spec("3gp", "144p", "MPEG-4 Visual", "Simple", "0.05", "AAC", "24")),
    // MPEG-4
    (18, spec("mp4", "360p", "H.264", "Baseline", "0.5", "AAC", "96")),
    (22, spec("mp4", "720p", "H.264", "High", "2-2.9", "AAC", "192")),
    (37, spec("mp4", "1080p", "H.264", "High", "3-4.3", "AAC", "192")),
    (38, spec("mp4", "3072p", "H.264", "High", "3.5-5", "AAC", "192")),
    (82, spec("mp4", "360p", "H.264", "3D", "0.5", "AAC", "96")),
    (83, spec("mp4", "240p", "H.264", "3D", "0.5", "AAC", "96")),
    (84, spec("mp4", "720p", "H.264", "3D", "2-2.9", "AAC", "152")),
    (85, spec("mp4", "520p", "H.264", "3D", "2-2.9", "AAC", "152")),
    // WebM
    (43, spec("webm", "360p", "VP8", "N/A", "0.5", "Vorbis", "128")),
    (44, spec("webm", "480p", "VP8", "N/A", "1", "Vorbis", "128")),
    (45, spec("webm", "720p", "VP8", "N/A", "2", "Vorbis", "192")),
    (46, spec("webm", "1080p", "VP8", "N/A", "N/A", "Vorbis", "192")),
    (100, spec("webm", "360p", "VP8", "3D", "N/A", "Vorbis", "128")),
    (101, spec("webm", "360p", "VP8", "3D", "N/A", "Vorbis", "192")),
    (102, spec("webm", "720p", "VP8", "3D", "N/A", "Vorbis", "192")),
];

/// Resolve an itag to its fixed format attributes.
///
/// Unknown itags are a recoverable condition: the caller skips the
/// variant rather than failing the whole fetch.
pub fn resolve(itag: u32) -> Option<&'static FormatSpec> {
    FORMAT_TABLE
        .iter()
        .find(|(key, _)| *key == itag)
        .map(|(_, spec)| spec)
}

/// All itags present in the table, in table order.
pub fn known_itags() -> impl Iterator<Item = u32> {
    FORMAT_TABLE.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_itag() {
        let spec = resolve(18).unwrap();
        assert_eq!(spec.container, "mp4");
        assert_eq!(spec.resolution, "360p");
        assert_eq!(spec.video_codec, "H.264");
        assert_eq!(spec.video_profile, "Baseline");
        assert_eq!(spec.video_bitrate, "0.5");
        assert_eq!(spec.audio_codec, "AAC");
        assert_eq!(spec.audio_bitrate, "96");
    }

    #[test]
    fn test_resolve_720p_mp4() {
        let spec = resolve(22).unwrap();
        assert_eq!(spec.container, "mp4");
        assert_eq!(spec.resolution, "720p");
        assert_eq!(spec.video_profile, "High");
    }

    #[test]
    fn test_resolve_webm() {
        let spec = resolve(46).unwrap();
        assert_eq!(spec.container, "webm");
        assert_eq!(spec.resolution, "1080p");
        assert_eq!(spec.video_codec, "VP8");
        assert_eq!(spec.audio_codec, "Vorbis");
    }

    #[test]
    fn test_resolve_unknown_itag() {
        assert!(resolve(9999).is_none());
        assert!(resolve(0).is_none());
        assert!(resolve(u32::MAX).is_none());
    }

    #[test]
    fn test_every_known_itag_resolves() {
        for itag in known_itags() {
            assert!(resolve(itag).is_some(), "itag {} missing", itag);
        }
        assert_eq!(known_itags().count(), 22);
    }
}
