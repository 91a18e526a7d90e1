//! Training orchestration around the [`Trainer`](crate::ports::Trainer) port.
//!
//! The network and its optimizer are supplied by the trainer implementation;
//! this module validates parameters, checks the dataset, persists the result
//! and keeps the curve data a front end renders.

mod dataset;
mod history;
mod params;
mod runner;

pub use dataset::{DatasetLayout, Split};
pub use history::TrainingHistory;
pub use params::TrainingParams;
pub use runner::run_training;
