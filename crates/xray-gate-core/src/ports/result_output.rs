//! Result output port for writing validation results.

use crate::domain::ValidationResult;

/// Port for outputting validation results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single validation result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &ValidationResult) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
