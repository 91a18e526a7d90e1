//! Model artifact location and status.
//!
//! Only the presence of the trained artifact is managed here; loading it is
//! up to the classifier implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// File name of the trained classifier inside the models directory.
pub const ARTIFACT_FILENAME: &str = "model.safetensors";

/// Returns the models directory path.
///
/// Uses `XDG_DATA_HOME/xray-gate/models` or `~/.local/share/xray-gate/models`.
#[must_use]
pub fn models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xray-gate")
        .join("models")
}

/// Returns the artifact path, preferring an explicit override.
#[must_use]
pub fn model_artifact_path(override_path: Option<&Path>) -> PathBuf {
    override_path.map_or_else(|| models_dir().join(ARTIFACT_FILENAME), Path::to_path_buf)
}

/// Presence of a trained model artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    /// Where the artifact is expected.
    pub path: PathBuf,
    /// Whether a file exists at `path`.
    pub installed: bool,
    /// File size when installed.
    pub size_bytes: Option<u64>,
}

/// Reports whether a trained model exists at `path`.
///
/// Classification is only possible once this reports `installed`.
#[must_use]
pub fn model_status(path: &Path) -> ModelStatus {
    let size_bytes = fs::metadata(path)
        .ok()
        .filter(std::fs::Metadata::is_file)
        .map(|m| m.len());
    debug!(
        "Model artifact {}: {}",
        path.display(),
        if size_bytes.is_some() { "present" } else { "missing" }
    );

    ModelStatus {
        path: path.to_path_buf(),
        installed: size_bytes.is_some(),
        size_bytes,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_models_dir() {
        let dir = models_dir();
        assert!(dir.ends_with("xray-gate/models"));
    }

    #[test]
    fn test_default_artifact_path() {
        let path = model_artifact_path(None);
        assert!(path.ends_with("xray-gate/models/model.safetensors"));
    }

    #[test]
    fn test_override_artifact_path() {
        let path = model_artifact_path(Some(Path::new("/tmp/custom.bin")));
        assert_eq!(path, PathBuf::from("/tmp/custom.bin"));
    }

    #[test]
    fn test_status_missing() {
        let dir = tempfile::tempdir().unwrap();
        let status = model_status(&dir.path().join("model.safetensors"));
        assert!(!status.installed);
        assert_eq!(status.size_bytes, None);
    }

    #[test]
    fn test_status_directory_is_not_a_model() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!model_status(dir.path()).installed);
    }

    #[test]
    fn test_status_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.safetensors");
        fs::write(&path, [0u8; 42]).unwrap();

        let status = model_status(&path);
        assert!(status.installed);
        assert_eq!(status.size_bytes, Some(42));
    }
}
