//! Training progress port and its channel adapter.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::domain::TrainingEvent;

/// Port for receiving training events.
pub trait TrainingSink: Send + Sync {
    /// Called when a training event occurs.
    fn on_event(&self, event: TrainingEvent);
}

/// Forwards training events onto an mpsc channel.
///
/// Subscribers drain the receiving end at their own pace; a dropped receiver
/// is not an error for the trainer.
pub struct ChannelSink {
    sender: Sender<TrainingEvent>,
}

impl ChannelSink {
    /// Wraps an existing sender.
    #[must_use]
    pub const fn new(sender: Sender<TrainingEvent>) -> Self {
        Self { sender }
    }

    /// Creates a sink and the receiver its events arrive on.
    #[must_use]
    pub fn channel() -> (Self, Receiver<TrainingEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }
}

impl TrainingSink for ChannelSink {
    fn on_event(&self, event: TrainingEvent) {
        if let Err(e) = self.sender.send(event) {
            debug!("Training event dropped, no subscriber: {:?}", e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EpochMetrics;

    #[test]
    fn test_events_arrive_in_order() {
        let (sink, receiver) = ChannelSink::channel();

        sink.on_event(TrainingEvent::EpochStarted { epoch: 1, total: 2 });
        sink.on_event(TrainingEvent::EpochCompleted(EpochMetrics {
            epoch: 1,
            loss: 0.6,
            accuracy: 0.7,
            val_loss: 0.65,
            val_accuracy: 0.68,
        }));
        drop(sink);

        let events: Vec<_> = receiver.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TrainingEvent::EpochStarted { epoch: 1, total: 2 }));
        assert!(matches!(&events[1], TrainingEvent::EpochCompleted(m) if m.epoch == 1));
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (sink, receiver) = ChannelSink::channel();
        drop(receiver);
        sink.on_event(TrainingEvent::EpochStarted { epoch: 1, total: 1 });
    }

    #[test]
    fn test_events_cross_threads() {
        let (sink, receiver) = ChannelSink::channel();
        let handle = std::thread::spawn(move || {
            for epoch in 1..=3 {
                sink.on_event(TrainingEvent::EpochStarted { epoch, total: 3 });
            }
        });

        let epochs: Vec<_> = receiver
            .iter()
            .filter_map(|e| match e {
                TrainingEvent::EpochStarted { epoch, .. } => Some(epoch),
                _ => None,
            })
            .collect();
        assert!(handle.join().is_ok());
        assert_eq!(epochs, [1, 2, 3]);
    }
}
