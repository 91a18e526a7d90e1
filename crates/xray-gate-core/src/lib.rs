//! X-ray Gate Core - Domain logic and plausibility checks
//!
//! This crate contains the verdict types, the check trait and the three
//! checks that decide whether an image looks like a chest radiograph, plus
//! the ports through which a classifier and its trainer plug in.

pub mod checks;
pub mod domain;
pub mod inference;
pub mod ports;
pub mod training;
pub mod validator;

pub use domain::{
    Check, Diagnosis, EpochMetrics, Finding, ImageDimensions, ImageInfo, Rejection,
    TrainingEvent, ValidationResult, Verdict,
};
pub use ports::{
    ChannelSink, Classifier, ImageSource, ProgressEvent, ProgressSink, ResultOutput, SourceItem,
    TrainedModel, Trainer, TrainingSink,
};
pub use validator::{validate, ImageInput, ValidatorConfig, XrayValidator};
