//! Accumulated training curves.

use crate::domain::{EpochMetrics, TrainingEvent};

/// Curve data and progress built up from training events.
///
/// A front end owns one of these, feeds it every event it receives and
/// renders from it; nothing about rendering is kept anywhere else.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    total_epochs: usize,
    current_epoch: usize,
    epochs: Vec<EpochMetrics>,
    finished: bool,
}

impl TrainingHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the history with one event.
    pub fn record(&mut self, event: &TrainingEvent) {
        match event {
            TrainingEvent::EpochStarted { epoch, total } => {
                self.current_epoch = *epoch;
                self.total_epochs = *total;
            }
            TrainingEvent::EpochCompleted(metrics) => {
                self.current_epoch = metrics.epoch;
                self.epochs.push(*metrics);
            }
            TrainingEvent::Finished { epochs, .. } => {
                self.total_epochs = *epochs;
                self.finished = true;
            }
        }
    }

    /// Epoch currently running or last completed (1-based, 0 before start).
    #[must_use]
    pub const fn current_epoch(&self) -> usize {
        self.current_epoch
    }

    /// Planned number of epochs, 0 until the first event.
    #[must_use]
    pub const fn total_epochs(&self) -> usize {
        self.total_epochs
    }

    /// Whether training finished and the model was saved.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Completed fraction (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fraction_complete(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        if self.total_epochs == 0 {
            return 0.0;
        }
        (self.epochs.len() as f64 / self.total_epochs as f64).min(1.0)
    }

    /// Metrics of the most recent completed epoch.
    #[must_use]
    pub fn latest(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// All completed epochs in order.
    #[must_use]
    pub fn epochs(&self) -> &[EpochMetrics] {
        &self.epochs
    }

    /// Training accuracy curve.
    #[must_use]
    pub fn accuracy(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.accuracy).collect()
    }

    /// Validation accuracy curve.
    #[must_use]
    pub fn val_accuracy(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.val_accuracy).collect()
    }

    /// Training loss curve.
    #[must_use]
    pub fn loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.loss).collect()
    }

    /// Validation loss curve.
    #[must_use]
    pub fn val_loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.val_loss).collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn metrics(epoch: usize, loss: f64, accuracy: f64) -> EpochMetrics {
        EpochMetrics {
            epoch,
            loss,
            accuracy,
            val_loss: loss + 0.05,
            val_accuracy: accuracy - 0.05,
        }
    }

    #[test]
    fn test_empty_history() {
        let history = TrainingHistory::new();
        assert_eq!(history.fraction_complete(), 0.0);
        assert!(history.latest().is_none());
        assert!(!history.is_finished());
    }

    #[test]
    fn test_curves_follow_events() {
        let mut history = TrainingHistory::new();
        history.record(&TrainingEvent::EpochStarted { epoch: 1, total: 4 });
        history.record(&TrainingEvent::EpochCompleted(metrics(1, 0.7, 0.6)));
        history.record(&TrainingEvent::EpochStarted { epoch: 2, total: 4 });
        history.record(&TrainingEvent::EpochCompleted(metrics(2, 0.5, 0.8)));

        assert_eq!(history.current_epoch(), 2);
        assert_eq!(history.total_epochs(), 4);
        assert_eq!(history.loss(), [0.7, 0.5]);
        assert_eq!(history.accuracy(), [0.6, 0.8]);
        assert_eq!(history.val_loss().len(), 2);
        assert_eq!(history.val_accuracy().len(), 2);
        assert_eq!(history.fraction_complete(), 0.5);
        assert_eq!(history.latest().map(|m| m.epoch), Some(2));
    }

    #[test]
    fn test_started_epoch_does_not_count_as_complete() {
        let mut history = TrainingHistory::new();
        history.record(&TrainingEvent::EpochStarted { epoch: 1, total: 2 });
        assert_eq!(history.current_epoch(), 1);
        assert_eq!(history.fraction_complete(), 0.0);
    }

    #[test]
    fn test_finished_is_complete() {
        let mut history = TrainingHistory::new();
        history.record(&TrainingEvent::EpochStarted { epoch: 1, total: 1 });
        history.record(&TrainingEvent::EpochCompleted(metrics(1, 0.4, 0.9)));
        history.record(&TrainingEvent::Finished {
            epochs: 1,
            artifact: PathBuf::from("model.safetensors"),
        });

        assert!(history.is_finished());
        assert_eq!(history.fraction_complete(), 1.0);
    }
}
