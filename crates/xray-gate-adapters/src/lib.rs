//! X-ray Gate Adapters - External adapters for xray-gate.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Dataset inspection
//! - Model artifact location

pub mod dataset;
pub mod fs;
pub mod models;

pub use dataset::{scan_dataset, ClassCount, DatasetSummary};
pub use fs::{load_image, FsImageSource, IMAGE_EXTENSIONS};
pub use models::{model_artifact_path, model_status, models_dir, ModelStatus, ARTIFACT_FILENAME};
