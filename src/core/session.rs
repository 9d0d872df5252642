//! Video session: one source URL, one catalog

use crate::core::catalog::{VariantCatalog, VariantDescriptor};
use crate::error::GrabError;
use crate::platform::VideoInfoFetcher;
use crate::utils;
use tracing::info;

/// A single video session.
///
/// Assigning a source URL is the sole trigger for (re)populating the
/// variant catalog. The catalog is invalidated before each fetch starts,
/// so a failed fetch leaves it empty rather than stale.
pub struct VideoSession {
    fetcher: VideoInfoFetcher,
    source_url: Option<String>,
    filename_override: Option<String>,
    catalog: VariantCatalog,
}

impl VideoSession {
    pub fn new() -> Self {
        Self::with_fetcher(VideoInfoFetcher::new())
    }

    /// Build a session around a specific fetcher. Used by tests to point
    /// at a local endpoint.
    pub fn with_fetcher(fetcher: VideoInfoFetcher) -> Self {
        Self {
            fetcher,
            source_url: None,
            filename_override: None,
            catalog: VariantCatalog::default(),
        }
    }

    /// Assign the source page URL and rebuild the catalog from a fresh
    /// metadata fetch. Any previous catalog and filename override are
    /// discarded first, even when the new fetch fails.
    pub fn set_url(&mut self, page_url: &str) -> Result<(), GrabError> {
        self.source_url = Some(page_url.to_string());
        self.filename_override = None;
        self.catalog = VariantCatalog::default();

        let video_id = utils::url::extract_video_id(page_url)?;
        let (title, variants) = self.fetcher.fetch(&video_id)?;
        info!("resolved {} variant(s) for '{}'", variants.len(), title);

        self.catalog = VariantCatalog::new(title, variants);
        Ok(())
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    pub fn title(&self) -> &str {
        &self.catalog.title
    }

    /// The filename used for downloads: the override when set, otherwise
    /// the video title.
    pub fn filename(&self) -> &str {
        self.filename_override.as_deref().unwrap_or(&self.catalog.title)
    }

    /// Override the download filename for every variant in the catalog.
    pub fn set_filename(&mut self, filename: &str) {
        self.filename_override = Some(filename.to_string());
        self.catalog.set_filename(filename);
    }

    /// First catalog variant matching the given filters.
    pub fn get(&self, container: Option<&str>, resolution: Option<&str>) -> Option<&VariantDescriptor> {
        self.catalog.get(container, resolution)
    }

    /// All catalog variants matching the given filters, in catalog order.
    pub fn filter(
        &self,
        container: Option<&str>,
        resolution: Option<&str>,
    ) -> Vec<&VariantDescriptor> {
        self.catalog.filter(container, resolution)
    }
}

impl Default for VideoSession {
    fn default() -> Self {
        Self::new()
    }
}
