//! Variant catalog: the ordered set of downloadable encodings of one video

use crate::platform::formats::FormatSpec;
use serde::Serialize;
use std::cmp::Ordering;

/// One downloadable encoding of a video.
#[derive(Debug, Clone, Serialize)]
pub struct VariantDescriptor {
    /// Direct media URL, including the recovered signature when one was
    /// present in the same stream-map segment.
    pub source_url: String,
    /// Opaque format identifier assigned by the upstream service.
    pub itag: u32,
    pub container: String,
    pub resolution: String,
    pub video_codec: String,
    pub video_profile: String,
    pub video_bitrate: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    /// Filename (minus extension) shared across all variants of the same
    /// source video unless explicitly overridden.
    pub display_filename: String,
}

impl VariantDescriptor {
    /// Build a descriptor from a resolved format table entry.
    pub fn from_spec(itag: u32, source_url: String, spec: &FormatSpec) -> Self {
        Self {
            source_url,
            itag,
            container: spec.container.to_string(),
            resolution: spec.resolution.to_string(),
            video_codec: spec.video_codec.to_string(),
            video_profile: spec.video_profile.to_string(),
            video_bitrate: spec.video_bitrate.to_string(),
            audio_codec: spec.audio_codec.to_string(),
            audio_bitrate: spec.audio_bitrate.to_string(),
            display_filename: String::new(),
        }
    }

    /// Pixel height parsed from the resolution label, 0 when unknown
    /// (e.g. "N/A").
    pub fn height(&self) -> u32 {
        parse_height(&self.resolution)
    }
}

impl std::fmt::Display for VariantDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "itag={} | {} | {} | {} {}",
            self.itag, self.container, self.resolution, self.video_codec, self.video_profile
        )
    }
}

fn parse_height(resolution: &str) -> u32 {
    resolution
        .strip_suffix('p')
        .and_then(|h| h.parse().ok())
        .unwrap_or(0)
}

/// Ordered collection of the variants of one video.
///
/// Rebuilt in full on every metadata fetch; a new source URL discards the
/// prior catalog entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VariantCatalog {
    /// Video title, extracted once per fetch.
    pub title: String,
    variants: Vec<VariantDescriptor>,
}

impl VariantCatalog {
    /// Build a catalog, sorting the variants into canonical order.
    pub fn new(title: String, mut variants: Vec<VariantDescriptor>) -> Self {
        variants.sort_by(compare_variants);
        Self { title, variants }
    }

    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// First variant matching the given container and resolution filters,
    /// in catalog order. `None` criteria match everything.
    pub fn get(&self, container: Option<&str>, resolution: Option<&str>) -> Option<&VariantDescriptor> {
        self.filter(container, resolution).into_iter().next()
    }

    /// All variants matching the given container and resolution filters,
    /// in stable catalog order.
    pub fn filter(
        &self,
        container: Option<&str>,
        resolution: Option<&str>,
    ) -> Vec<&VariantDescriptor> {
        self.variants
            .iter()
            .filter(|v| container.map_or(true, |c| v.container == c))
            .filter(|v| resolution.map_or(true, |r| v.resolution == r))
            .collect()
    }

    /// Overwrite the display filename on every variant.
    pub fn set_filename(&mut self, filename: &str) {
        for variant in &mut self.variants {
            variant.display_filename = filename.to_string();
        }
    }
}

/// Composite (container, resolution) descending order, resolution compared
/// by parsed pixel height; itag ascending as the final tie-break so the
/// order is insertion-independent.
fn compare_variants(a: &VariantDescriptor, b: &VariantDescriptor) -> Ordering {
    b.container
        .cmp(&a.container)
        .then_with(|| b.height().cmp(&a.height()))
        .then_with(|| a.itag.cmp(&b.itag))
}
