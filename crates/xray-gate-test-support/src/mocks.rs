//! Mock implementations of core port traits.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use xray_gate_core::domain::{EpochMetrics, ImageInfo, TrainingEvent, ValidationResult};
use xray_gate_core::inference::PreprocessedImage;
use xray_gate_core::ports::{
    Classifier, ImageSource, ProgressEvent, ProgressSink, ResultOutput, SourceItem, TrainedModel,
    Trainer, TrainingSink,
};
use xray_gate_core::training::{DatasetLayout, TrainingParams};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images, optionally followed by load failures, and tracks
/// iteration for assertions.
pub struct MockImageSource {
    images: Vec<ImageInfo>,
    failures: Vec<(String, String)>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images,
            failures: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Adds an entry that fails to load with the given message.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.push((path.into(), reason.into()));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = SourceItem> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        let loaded = self.images.iter().cloned().map(|info| SourceItem {
            path: info.path.clone(),
            image: Ok(info),
        });
        let failed = self.failures.iter().map(|(path, reason)| SourceItem {
            path: path.clone(),
            image: Err(anyhow::anyhow!("{reason}")),
        });
        Box::new(loaded.chain(failed))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len() + self.failures.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures results for later assertions.
pub struct MockResultOutput {
    results: Arc<Mutex<Vec<ValidationResult>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured results.
    #[must_use]
    pub fn results(&self) -> Vec<ValidationResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, result: &ValidationResult) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { accepted, rejected } => Some((*accepted, *rejected)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Training sink that records every event.
#[derive(Default)]
pub struct RecordingTrainingSink {
    events: Mutex<Vec<TrainingEvent>>,
}

impl RecordingTrainingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<TrainingEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TrainingSink for RecordingTrainingSink {
    fn on_event(&self, event: TrainingEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Classifier returning a fixed probability.
pub struct MockClassifier {
    probability: f32,
    calls: Mutex<Vec<Vec<usize>>>,
}

impl MockClassifier {
    /// Creates a classifier that always answers `probability`.
    #[must_use]
    pub const fn new(probability: f32) -> Self {
        Self {
            probability,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the tensor shapes seen by `predict`, one per call.
    #[must_use]
    pub fn seen_shapes(&self) -> Vec<Vec<usize>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, image: &PreprocessedImage) -> anyhow::Result<f32> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(image.tensor().dims().to_vec());
        Ok(self.probability)
    }
}

/// Trained model produced by [`MockTrainer`].
pub struct MockTrainedModel {
    classifier: MockClassifier,
    payload: Vec<u8>,
}

impl MockTrainedModel {
    /// Creates a model answering `probability` and saving `payload`.
    #[must_use]
    pub const fn new(probability: f32, payload: Vec<u8>) -> Self {
        Self {
            classifier: MockClassifier::new(probability),
            payload,
        }
    }
}

impl Classifier for MockTrainedModel {
    fn predict(&self, image: &PreprocessedImage) -> anyhow::Result<f32> {
        self.classifier.predict(image)
    }
}

impl TrainedModel for MockTrainedModel {
    fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, &self.payload)?;
        Ok(())
    }
}

/// Trainer that replays scripted epoch metrics.
///
/// Emits events exactly as a real trainer would, then returns a
/// [`MockTrainedModel`]. Epochs beyond the script repeat its last entry.
pub struct MockTrainer {
    script: Vec<EpochMetrics>,
    probability: f32,
    fail_with: Option<String>,
    runs: Mutex<Vec<TrainingParams>>,
}

impl MockTrainer {
    /// Creates a trainer with steadily improving metrics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn improving(epochs: usize) -> Self {
        let script = (1..=epochs.max(1))
            .map(|epoch| {
                let step = epoch as f64 / (epochs.max(1) as f64 + 1.0);
                EpochMetrics {
                    epoch,
                    loss: 0.7 * (1.0 - step),
                    accuracy: 0.5 + 0.4 * step,
                    val_loss: 0.75 * (1.0 - step),
                    val_accuracy: 0.5 + 0.35 * step,
                }
            })
            .collect();
        Self::scripted(script)
    }

    /// Creates a trainer replaying `script`.
    #[must_use]
    pub fn scripted(script: Vec<EpochMetrics>) -> Self {
        Self {
            script,
            probability: 0.5,
            fail_with: None,
            runs: Mutex::new(Vec::new()),
        }
    }

    /// Makes the trained model answer `probability`.
    #[must_use]
    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }

    /// Makes training fail after the first epoch.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Parameters of every `train` call.
    #[must_use]
    pub fn runs(&self) -> Vec<TrainingParams> {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Trainer for MockTrainer {
    fn train(
        &self,
        _dataset: &DatasetLayout,
        params: &TrainingParams,
        progress: &dyn TrainingSink,
    ) -> anyhow::Result<Box<dyn TrainedModel>> {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params.clone());

        for epoch in 1..=params.epochs {
            progress.on_event(TrainingEvent::EpochStarted {
                epoch,
                total: params.epochs,
            });

            if let Some(message) = &self.fail_with {
                anyhow::bail!("{message}");
            }

            let template = self
                .script
                .get(epoch - 1)
                .or_else(|| self.script.last())
                .copied()
                .unwrap_or(EpochMetrics {
                    epoch,
                    loss: 0.0,
                    accuracy: 0.0,
                    val_loss: 0.0,
                    val_accuracy: 0.0,
                });
            progress.on_event(TrainingEvent::EpochCompleted(EpochMetrics {
                epoch,
                ..template
            }));
        }

        Ok(Box::new(MockTrainedModel::new(
            self.probability,
            format!("mock-model epochs={}", params.epochs).into_bytes(),
        )))
    }
}
