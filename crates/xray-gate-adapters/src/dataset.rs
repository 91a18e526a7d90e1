//! Dataset inspection.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;
use xray_gate_core::training::{DatasetLayout, Split};
use xray_gate_core::Finding;

use crate::fs::collect_from_dir;

/// Image count for one class directory of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCount {
    /// Split the directory belongs to.
    pub split: Split,
    /// Class the directory holds.
    pub finding: Finding,
    /// Directory path.
    pub dir: PathBuf,
    /// Whether the directory exists.
    pub present: bool,
    /// Supported images found directly or below it.
    pub images: usize,
}

/// Per split and class image counts of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Dataset root.
    pub root: PathBuf,
    /// One entry per split and class, in directory order.
    pub classes: Vec<ClassCount>,
}

impl DatasetSummary {
    /// Total images in one split.
    #[must_use]
    pub fn split_total(&self, split: Split) -> usize {
        self.classes
            .iter()
            .filter(|c| c.split == split)
            .map(|c| c.images)
            .sum()
    }

    /// Total images per class across all splits.
    #[must_use]
    pub fn class_totals(&self) -> BTreeMap<&'static str, usize> {
        let mut totals = BTreeMap::new();
        for c in &self.classes {
            *totals.entry(c.finding.dir_name()).or_default() += c.images;
        }
        totals
    }

    /// Total images in the dataset.
    #[must_use]
    pub fn total(&self) -> usize {
        self.classes.iter().map(|c| c.images).sum()
    }

    /// Returns the count for one split and class.
    #[must_use]
    pub fn get(&self, split: Split, finding: Finding) -> Option<&ClassCount> {
        self.classes
            .iter()
            .find(|c| c.split == split && c.finding == finding)
    }
}

/// Counts the images of every split and class.
///
/// Missing directories are reported as absent with zero images; use
/// [`DatasetLayout::check`] to decide whether training can start.
#[must_use]
pub fn scan_dataset(layout: &DatasetLayout) -> DatasetSummary {
    let mut classes = Vec::with_capacity(Split::ALL.len() * Finding::ALL.len());

    for split in Split::ALL {
        for finding in Finding::ALL {
            let dir = layout.class_dir(split, finding);
            let present = dir.is_dir();
            let mut files = Vec::new();
            if present {
                collect_from_dir(&dir, true, &mut files);
            }
            debug!("{}: {} images", dir.display(), files.len());

            classes.push(ClassCount {
                split,
                finding,
                dir,
                present,
                images: files.len(),
            });
        }
    }

    DatasetSummary {
        root: layout.root().to_path_buf(),
        classes,
    }
}
