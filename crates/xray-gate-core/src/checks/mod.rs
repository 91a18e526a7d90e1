//! Plausibility check implementations.
//!
//! Each check implements the `Check` trait for one property of a chest
//! radiograph. They are listed here cheapest first, the order the validator
//! runs them in.

mod grayscale;
mod intensity;
mod size;

pub use grayscale::{max_channel_difference, GrayscaleCheck, GrayscaleConfig};
pub use intensity::{IntensityCheck, IntensityConfig, IntensityHistogram, IntensityStats};
pub use size::{SizeCheck, SizeConfig};
