//! Test support utilities for xray-gate.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the validation pipeline and the classifier ports.
//!
//! # Example
//!
//! ```
//! use xray_gate_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // Create synthetic test images
//! let plausible = SyntheticImageBuilder::radiograph_like(256, 256);
//! let blank = SyntheticImageBuilder::uniform_gray(256, 256, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![plausible, blank]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{
    MockClassifier, MockImageSource, MockProgressSink, MockResultOutput, MockTrainedModel,
    MockTrainer, RecordingTrainingSink,
};
