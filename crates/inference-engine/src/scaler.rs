//! Feature Standardization

use crate::ArtifactError;
use feature_engine::FEATURE_COUNT;
use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Normalization applied to the derived features before classification
pub trait Scaler: Send + Sync {
    /// Transform a single feature row
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError>;

    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;
}

/// On-disk form of a fitted standard scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Standard scaler with per-feature mean and scale fitted offline.
///
/// Computes `(x - mean) / scale`. A zero scale marks a constant feature in
/// the training set; it is centered but left undivided.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Build a scaler from fitted parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} mean/scale entries, got {}/{}",
                FEATURE_COUNT,
                mean.len(),
                scale.len()
            ));
        }
        if let Some(bad) = mean.iter().chain(&scale).find(|v| !v.is_finite()) {
            return Err(format!("non-finite parameter {}", bad));
        }
        if let Some(bad) = scale.iter().find(|v| **v < 0.0) {
            return Err(format!("negative scale {}", bad));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: Array1::from_vec(mean),
            scale,
        })
    }

    /// Load a scaler from a JSON artifact
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        if !path.is_file() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let corrupt = |reason: String| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
        let artifact: ScalerArtifact =
            serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
        let scaler = Self::new(artifact.mean, artifact.scale).map_err(corrupt)?;

        info!("Loaded standard scaler from {}", path.display());
        Ok(scaler)
    }

    /// Transform a batch of rows, one observation per row
    pub fn transform_rows(&self, rows: ArrayView2<'_, f64>) -> Result<Array2<f64>, ArtifactError> {
        if rows.ncols() != self.mean.len() {
            return Err(ArtifactError::ShapeMismatch {
                expected: self.mean.len(),
                actual: rows.ncols(),
            });
        }
        Ok((&rows - &self.mean) / &self.scale)
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        let row = ArrayView2::from_shape((1, features.len()), features).map_err(|e| {
            ArtifactError::InferenceFailed(format!("cannot shape feature row: {}", e))
        })?;
        let scaled = self.transform_rows(row)?;
        Ok(scaled.iter().copied().collect())
    }

    fn n_features(&self) -> usize {
        self.mean.len()
    }
}
