//! On-disk dataset layout.
//!
//! Images are stored one directory per class inside each split:
//! `root/{train,val,test}/{NORMAL,PNEUMONIA}`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::domain::Finding;

/// A dataset split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    /// Training images.
    Train,
    /// Validation images.
    Val,
    /// Held-out test images.
    Test,
}

impl Split {
    /// All splits in directory order.
    pub const ALL: [Self; 3] = [Self::Train, Self::Val, Self::Test];

    /// Directory name for this split.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }
}

/// Location of a class-per-directory dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the dataset root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one split.
    #[must_use]
    pub fn split_dir(&self, split: Split) -> PathBuf {
        self.root.join(split.dir_name())
    }

    /// Directory holding one class of one split.
    #[must_use]
    pub fn class_dir(&self, split: Split, finding: Finding) -> PathBuf {
        self.split_dir(split).join(finding.dir_name())
    }

    /// Verifies the training classes exist before any training starts.
    ///
    /// Missing validation or test splits only produce a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if either training class directory is missing.
    pub fn check(&self) -> Result<()> {
        for finding in Finding::ALL {
            let dir = self.class_dir(Split::Train, finding);
            if !dir.is_dir() {
                anyhow::bail!(
                    "Dataset not found: {} is missing. Download the dataset into {} first.",
                    dir.display(),
                    self.root.display()
                );
            }
        }

        for split in [Split::Val, Split::Test] {
            let dir = self.split_dir(split);
            if !dir.is_dir() {
                warn!("Dataset split missing: {}", dir.display());
            }
        }

        Ok(())
    }
}
