//! ONNX classifier (pure Rust via `tract-onnx`).
//!
//! Output 0 holds the label, output 1 (optional) holds class probabilities
//! shaped `[1, 2]`. tract covers the standard ONNX operators but, from the
//! `ai.onnx.ml` domain, only `TreeEnsembleClassifier`: tree-ensemble exports
//! and models built from standard ops (`MatMul`, `Sigmoid`, ...) load, while
//! skl2onnx linear-model exports (`LinearClassifier` op) are reported as
//! corrupt. Ship those as JSON linear artifacts instead.

use crate::classifier::Classifier;
use crate::ArtifactError;
use feature_engine::FEATURE_COUNT;
use std::path::{Path, PathBuf};
use tracing::info;
use tract_onnx::prelude::*;

pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
    path: PathBuf,
    has_proba: bool,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("path", &self.path)
            .field("has_proba", &self.has_proba)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load an ONNX model and specialize it to a `[1, FEATURE_COUNT]` f32 input
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.is_file() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let corrupt = |stage: &str, e: TractError| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("onnx {} failed: {}", stage, e),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| corrupt("load", e))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )
            .map_err(|e| corrupt("input fact", e))?
            .into_optimized()
            .map_err(|e| corrupt("optimize", e))?
            .into_runnable()
            .map_err(|e| corrupt("runnable", e))?;

        let mut model = Self {
            plan,
            path: path.to_path_buf(),
            has_proba: false,
        };

        // Probe the output layout with a dummy forward pass.
        let outputs = model.run(&[0.0; FEATURE_COUNT])?;
        if outputs.is_empty() {
            return Err(ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: "onnx model produced no outputs".to_string(),
            });
        }
        model.has_proba = outputs.len() > 1;

        info!(
            "Loaded ONNX classifier from {} (probabilities: {})",
            path.display(),
            model.has_proba
        );
        Ok(model)
    }

    fn run(&self, features: &[f64]) -> Result<TVec<TValue>, ArtifactError> {
        if features.len() != FEATURE_COUNT {
            return Err(ArtifactError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let input = tract_ndarray::Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            features.iter().map(|v| *v as f32).collect(),
        )
        .map_err(|e| ArtifactError::InferenceFailed(format!("onnx input reshape failed: {}", e)))?
        .into_tvalue();

        self.plan
            .run(tvec!(input))
            .map_err(|e| ArtifactError::InferenceFailed(format!("onnx run failed: {}", e)))
    }

    fn label_from(outputs: &TVec<TValue>) -> Result<i64, ArtifactError> {
        let labels = outputs[0]
            .cast_to::<i64>()
            .map_err(|e| ArtifactError::InferenceFailed(format!("onnx label decode failed: {}", e)))?;
        let view = labels
            .to_array_view::<i64>()
            .map_err(|e| ArtifactError::InferenceFailed(format!("onnx label decode failed: {}", e)))?;
        view.iter()
            .next()
            .copied()
            .ok_or_else(|| ArtifactError::InferenceFailed("onnx label output is empty".to_string()))
    }

    fn proba_from(outputs: &TVec<TValue>) -> Result<Option<f64>, ArtifactError> {
        let Some(probs) = outputs.get(1) else {
            return Ok(None);
        };
        let probs = probs
            .cast_to::<f32>()
            .map_err(|e| ArtifactError::InferenceFailed(format!("onnx proba decode failed: {}", e)))?;
        let view = probs
            .to_array_view::<f32>()
            .map_err(|e| ArtifactError::InferenceFailed(format!("onnx proba decode failed: {}", e)))?;

        // Positive class is the second column
        Ok(view.iter().nth(1).map(|p| *p as f64))
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError> {
        let outputs = self.run(features)?;
        Self::label_from(&outputs)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Option<f64>, ArtifactError> {
        if !self.has_proba {
            return Ok(None);
        }
        let outputs = self.run(features)?;
        Self::proba_from(&outputs)
    }

    fn supports_proba(&self) -> bool {
        self.has_proba
    }

    fn classify(&self, features: &[f64]) -> Result<(i64, Option<f64>), ArtifactError> {
        let outputs = self.run(features)?;
        Ok((Self::label_from(&outputs)?, Self::proba_from(&outputs)?))
    }
}
