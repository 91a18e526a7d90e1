//! Image source port for loading images from various sources.

use crate::domain::ImageInfo;

/// One entry produced by an image source.
///
/// The path is kept even when loading fails so the failure can be reported
/// against the file it came from.
#[derive(Debug)]
pub struct SourceItem {
    /// Path or identifier of the image.
    pub path: String,
    /// The loaded image, or why it could not be loaded.
    pub image: anyhow::Result<ImageInfo>,
}

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    fn images(&self) -> Box<dyn Iterator<Item = SourceItem> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
