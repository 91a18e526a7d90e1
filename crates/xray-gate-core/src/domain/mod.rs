//! Core domain types for X-ray plausibility validation.

mod check;
mod diagnosis;
mod result;
mod training;
mod verdict;

pub use check::Check;
pub use diagnosis::{Diagnosis, Finding};
pub use result::{is_single_channel, rgb8, ImageDimensions, ImageInfo, ValidationResult};
pub use training::{EpochMetrics, TrainingEvent};
pub use verdict::{Rejection, Verdict};
