//! Artifact Locations

use crate::classifier::{Classifier, LinearClassifier};
use crate::onnx::OnnxClassifier;
use crate::scaler::StandardScaler;
use crate::ArtifactError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the fitted scaler and classifier live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory holding both artifacts
    pub dir: PathBuf,
    /// Scaler file name, relative to `dir`
    pub scaler_file: String,
    /// Classifier file name, relative to `dir`. A `.onnx` extension selects
    /// the ONNX runtime; anything else is read as a JSON linear model.
    pub classifier_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            scaler_file: "scaler.json".to_string(),
            classifier_file: "model.json".to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Config rooted at `dir` with default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier_file)
    }

    pub(crate) fn load_scaler(&self) -> Result<StandardScaler, ArtifactError> {
        StandardScaler::from_path(&self.scaler_path())
    }

    pub(crate) fn load_classifier(&self) -> Result<Box<dyn Classifier>, ArtifactError> {
        let path = self.classifier_path();
        let is_onnx = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("onnx"))
            .unwrap_or(false);

        if is_onnx {
            Ok(Box::new(OnnxClassifier::load(&path)?))
        } else {
            Ok(Box::new(LinearClassifier::from_path(&path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let config = ArtifactConfig::default();
        assert_eq!(config.scaler_path(), Path::new("models/scaler.json"));
        assert_eq!(config.classifier_path(), Path::new("models/model.json"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ArtifactConfig =
            serde_json::from_str(r#"{"dir": "/srv/artifacts", "classifier_file": "model.onnx"}"#)
                .unwrap();
        assert_eq!(config.scaler_path(), Path::new("/srv/artifacts/scaler.json"));
        assert_eq!(config.classifier_path(), Path::new("/srv/artifacts/model.onnx"));
    }

    #[test]
    fn test_onnx_classifier_from_config() {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/linear_proba.onnx");
        let config = ArtifactConfig {
            classifier_file: fixture.to_string_lossy().into_owned(),
            ..ArtifactConfig::in_dir("/nonexistent")
        };

        // An absolute file name overrides the directory
        assert_eq!(config.classifier_path(), fixture);
        let classifier = config.load_classifier().unwrap();
        assert_eq!(classifier.kind(), "onnx");
        assert!(classifier.supports_proba());
    }

    #[test]
    fn test_onnx_extension_selects_onnx_loader() {
        let config = ArtifactConfig {
            classifier_file: "model.ONNX".to_string(),
            ..ArtifactConfig::in_dir("/nonexistent")
        };
        let err = config.load_classifier().err().unwrap();
        assert!(matches!(err, ArtifactError::NotFound(p) if p.ends_with("model.ONNX")));
    }
}
