//! Binary Classifiers

use crate::ArtifactError;
use feature_engine::FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Binary classifier over scaled feature vectors
pub trait Classifier: Send + Sync {
    /// Short name of the model family, for logs and health output
    fn kind(&self) -> &'static str;

    /// Predict the raw class label
    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError>;

    /// Probability of the positive class, if the model exposes one
    fn predict_proba(&self, features: &[f64]) -> Result<Option<f64>, ArtifactError>;

    /// Whether `predict_proba` can return a value
    fn supports_proba(&self) -> bool;

    /// Label and probability in one pass
    fn classify(&self, features: &[f64]) -> Result<(i64, Option<f64>), ArtifactError> {
        Ok((self.predict(features)?, self.predict_proba(features)?))
    }
}

/// Linear model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearKind {
    /// Logistic regression; probabilities via the logistic function
    LogisticRegression,
    /// Linear support vector classifier; no probabilities
    LinearSvc,
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

/// On-disk form of a fitted linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearArtifact {
    kind: LinearKind,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_classes")]
    classes: [i64; 2],
}

/// Linear decision function `w . x + b` with a fitted class pair.
///
/// A positive decision selects `classes[1]`, anything else `classes[0]`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    kind: LinearKind,
    coefficients: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    pub fn new(
        kind: LinearKind,
        coefficients: Vec<f64>,
        intercept: f64,
        classes: [i64; 2],
    ) -> Result<Self, String> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, got {}",
                FEATURE_COUNT,
                coefficients.len()
            ));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err("non-finite model parameter".to_string());
        }

        Ok(Self {
            kind,
            coefficients,
            intercept,
            classes,
        })
    }

    /// Logistic regression over the standard `{0, 1}` classes
    pub fn logistic(coefficients: Vec<f64>, intercept: f64) -> Result<Self, String> {
        Self::new(LinearKind::LogisticRegression, coefficients, intercept, default_classes())
    }

    /// Load a linear model from a JSON artifact
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        if !path.is_file() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let corrupt = |reason: String| ArtifactError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
        let artifact: LinearArtifact =
            serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
        let model = Self::new(
            artifact.kind,
            artifact.coefficients,
            artifact.intercept,
            artifact.classes,
        )
        .map_err(corrupt)?;

        info!("Loaded {:?} classifier from {}", model.kind, path.display());
        Ok(model)
    }

    /// Signed distance from the decision boundary
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        if features.len() != self.coefficients.len() {
            return Err(ArtifactError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        let decision = dot + self.intercept;
        if !decision.is_finite() {
            return Err(ArtifactError::NonFinite("decision value"));
        }
        Ok(decision)
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        match self.kind {
            LinearKind::LogisticRegression => "logistic_regression",
            LinearKind::LinearSvc => "linear_svc",
        }
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError> {
        let decision = self.decision_function(features)?;
        Ok(if decision > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Option<f64>, ArtifactError> {
        match self.kind {
            LinearKind::LogisticRegression => {
                Ok(Some(Self::sigmoid(self.decision_function(features)?)))
            }
            LinearKind::LinearSvc => Ok(None),
        }
    }

    fn supports_proba(&self) -> bool {
        self.kind == LinearKind::LogisticRegression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(kind: LinearKind) -> LinearClassifier {
        LinearClassifier::new(
            kind,
            vec![0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            -0.25,
            [0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_logistic_prediction() {
        let clf = model(LinearKind::LogisticRegression);
        let positive = [1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let negative = [-1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        assert_eq!(clf.predict(&positive).unwrap(), 1);
        assert_eq!(clf.predict(&negative).unwrap(), 0);

        let p = clf.predict_proba(&positive).unwrap().unwrap();
        assert!((p - 1.0 / (1.0 + (-1.25f64).exp())).abs() < 1e-12);
        assert!(p > 0.5);
        assert!(clf.predict_proba(&negative).unwrap().unwrap() < 0.5);
    }

    #[test]
    fn test_boundary_is_negative_class() {
        let clf = model(LinearKind::LogisticRegression);
        let on_boundary = [0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(clf.decision_function(&on_boundary).unwrap(), 0.0);
        assert_eq!(clf.predict(&on_boundary).unwrap(), 0);
    }

    #[test]
    fn test_svc_has_no_probability() {
        let clf = model(LinearKind::LinearSvc);
        let x = [1.0; 8];
        assert!(!clf.supports_proba());
        assert_eq!(clf.predict_proba(&x).unwrap(), None);
        assert_eq!(clf.classify(&x).unwrap(), (1, None));
    }

    #[test]
    fn test_non_finite_decision_is_an_error() {
        let clf = LinearClassifier::new(
            LinearKind::LinearSvc,
            vec![0.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0],
            0.0,
            [0, 1],
        )
        .unwrap();
        let overflowed = [0.0, 0.0, f64::INFINITY, 0.0, f64::INFINITY, 0.0, 0.0, 0.0];

        // inf - inf must not fall through to the negative class
        assert!(matches!(
            clf.predict(&overflowed),
            Err(ArtifactError::NonFinite("decision value"))
        ));
        assert!(matches!(
            clf.decision_function(&[f64::NAN; 8]),
            Err(ArtifactError::NonFinite(_))
        ));
    }

    #[test]
    fn test_custom_classes() {
        let clf = LinearClassifier::new(LinearKind::LinearSvc, vec![1.0; 8], 0.0, [0, 2]).unwrap();
        assert_eq!(clf.predict(&[1.0; 8]).unwrap(), 2);
    }

    #[test]
    fn test_shape_mismatch() {
        let clf = model(LinearKind::LogisticRegression);
        assert!(matches!(
            clf.predict(&[1.0; 5]),
            Err(ArtifactError::ShapeMismatch { expected: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_artifact_parsing() {
        let artifact: LinearArtifact = serde_json::from_str(
            r#"{"kind": "linear_svc", "coefficients": [1,2,3,4,5,6,7,8], "intercept": 0.5}"#,
        )
        .unwrap();
        assert_eq!(artifact.kind, LinearKind::LinearSvc);
        assert_eq!(artifact.classes, [0, 1]);
    }

    #[test]
    fn test_rejects_wrong_coefficient_count() {
        assert!(LinearClassifier::logistic(vec![1.0; 7], 0.0).is_err());
        assert!(LinearClassifier::logistic(vec![f64::INFINITY; 8], 0.0).is_err());
    }
}
