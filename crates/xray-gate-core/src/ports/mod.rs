//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod classifier;
mod image_source;
mod progress;
mod result_output;
mod training_sink;

pub use classifier::{Classifier, TrainedModel, Trainer};
pub use image_source::{ImageSource, SourceItem};
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use training_sink::{ChannelSink, TrainingSink};
