//! Career-Length Inference Engine
//!
//! Loads the offline-fitted scaler and classifier artifacts and runs the
//! `derive -> scale -> classify -> map` pipeline for a single stat line.

mod artifacts;
mod classifier;
mod engine;
pub mod global;
mod onnx;
mod scaler;

pub use artifacts::ArtifactConfig;
pub use classifier::{Classifier, LinearClassifier, LinearKind};
pub use engine::{CareerOutlook, InferenceGateway, PredictionReport, PredictionResult};
pub use onnx::OnnxClassifier;
pub use scaler::{Scaler, StandardScaler};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from artifact loading or inference.
///
/// Fatal for the request that hit them. A corrupt or mismatched artifact
/// will not recover on retry.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Artifact {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("Classifier returned unexpected label {0}")]
    UnexpectedLabel(i64),
    #[error("Classifier returned invalid probability {0}")]
    InvalidProbability(f64),
    #[error("Non-finite {0} in inference pipeline")]
    NonFinite(&'static str),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
