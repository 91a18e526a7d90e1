//! Filesystem adapter for loading images.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};
use xray_gate_core::{ImageInfo, ImageSource, SourceItem};

/// Extensions the validator can decode.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// A path named on the command line or found in a directory.
enum Entry {
    /// Candidate image, decoded when yielded.
    File(PathBuf),
    /// Explicitly named path that cannot be an image.
    Unreadable(PathBuf, &'static str),
}

/// Filesystem image source adapter.
///
/// The file list is collected once, on construction. Files are yielded in
/// path order within each directory so repeated runs produce the same
/// output order. Explicitly named files that are missing or have an
/// unsupported extension are still yielded, as load failures.
pub struct FsImageSource {
    entries: Vec<Entry>,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        let entries = collect_entries(paths, recursive);
        debug!("Found {} image files", entries.len());
        Self { entries }
    }
}

fn collect_entries(paths: Vec<PathBuf>, recursive: bool) -> Vec<Entry> {
    let mut entries = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut files = Vec::new();
            collect_from_dir(&path, recursive, &mut files);
            entries.extend(files.into_iter().map(Entry::File));
        } else if !path.exists() {
            warn!("Path does not exist: {}", path.display());
            entries.push(Entry::Unreadable(path, "Path does not exist"));
        } else if is_supported_image(&path) {
            entries.push(Entry::File(path));
        } else {
            warn!("Unsupported file type: {}", path.display());
            entries.push(Entry::Unreadable(path, "Unsupported file type"));
        }
    }

    entries
}

/// Appends the supported images under `dir` to `files`, sorted by path.
pub(crate) fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        } else if path.is_dir() && recursive {
            collect_from_dir(&path, recursive, files);
        }
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = SourceItem> + Send + '_> {
        Box::new(self.entries.iter().map(|entry| match entry {
            Entry::File(path) => SourceItem {
                path: path.to_string_lossy().into_owned(),
                image: load_image(path),
            },
            Entry::Unreadable(path, reason) => SourceItem {
                path: path.to_string_lossy().into_owned(),
                image: Err(anyhow!("{reason}: {}", path.display())),
            },
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// Checks if a path has a supported image extension.
pub(crate) fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Loads an image from the filesystem.
///
/// The format is sniffed from the file content, so a PNG saved with a
/// `.jpg` extension still decodes.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<ImageInfo> {
    let image = image::ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;

    Ok(ImageInfo::new(path.to_string_lossy(), image))
}
