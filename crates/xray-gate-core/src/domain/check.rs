//! Check trait for composable plausibility heuristics.

use super::Rejection;

/// Trait for implementing a single plausibility check.
///
/// Each check inspects one property of an image (size, channel agreement,
/// intensity spread) and either lets it through or names the reason it
/// cannot be a chest radiograph.
pub trait Check: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Evaluates an image.
    ///
    /// # Returns
    ///
    /// `None` if the image passes, `Some(rejection)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be inspected at all. The
    /// validator turns such errors into a format rejection.
    fn evaluate(&self, image: &image::DynamicImage) -> anyhow::Result<Option<Rejection>>;
}
