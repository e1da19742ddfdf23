//! Inference Gateway Implementation

use crate::artifacts::ArtifactConfig;
use crate::classifier::Classifier;
use crate::scaler::Scaler;
use crate::ArtifactError;
use feature_engine::{derive, AdvancedStats, DerivedFeatureVector, RawPlayerStats, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Career-length verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerOutlook {
    /// Career longer than five years (class 1)
    LongCareer,
    /// Career of five years or less (class 0)
    ShortCareer,
}

impl CareerOutlook {
    /// Map a raw classifier label. Only `0` and `1` are valid.
    pub fn from_label(label: i64) -> Result<Self, ArtifactError> {
        match label {
            1 => Ok(CareerOutlook::LongCareer),
            0 => Ok(CareerOutlook::ShortCareer),
            other => Err(ArtifactError::UnexpectedLabel(other)),
        }
    }

    /// Class label as produced by the classifier
    pub fn label(&self) -> i64 {
        match self {
            CareerOutlook::LongCareer => 1,
            CareerOutlook::ShortCareer => 0,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerOutlook::LongCareer => "long_career",
            CareerOutlook::ShortCareer => "short_career",
        }
    }

    /// Short verdict for display
    pub fn headline(&self) -> &'static str {
        match self {
            CareerOutlook::LongCareer => "Career > 5 years",
            CareerOutlook::ShortCareer => "Career ≤ 5 years",
        }
    }
}

/// Classifier verdict for one stat line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub outlook: CareerOutlook,
    /// Probability of a long career, when the classifier exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// Verdict plus the derived values presentation layers display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub result: PredictionResult,
    pub features: DerivedFeatureVector,
    pub advanced: AdvancedStats,
    /// Pipeline latency in microseconds
    pub latency_us: u64,
}

/// Scaler + classifier pair loaded once and shared read-only.
///
/// Holds no mutable state, so one instance can serve concurrent requests
/// behind an `Arc` without locking.
pub struct InferenceGateway {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for InferenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceGateway")
            .field("classifier", &self.classifier.kind())
            .field("supports_proba", &self.classifier.supports_proba())
            .finish()
    }
}

impl InferenceGateway {
    /// Assemble a gateway from already-loaded artifacts
    pub fn new(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if scaler.n_features() != FEATURE_COUNT {
            return Err(ArtifactError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: scaler.n_features(),
            });
        }
        Ok(Self { scaler, classifier })
    }

    /// Load both artifacts from disk
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        info!("Loading artifacts from {}", config.dir.display());

        let scaler = config.load_scaler()?;
        let classifier = config.load_classifier()?;
        let gateway = Self::new(Box::new(scaler), classifier)?;

        info!(
            "Inference gateway ready: classifier={}, probabilities={}",
            gateway.classifier_kind(),
            gateway.supports_proba()
        );
        Ok(gateway)
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }

    pub fn supports_proba(&self) -> bool {
        self.classifier.supports_proba()
    }

    /// Scale an already-derived feature vector and classify it
    pub fn classify(&self, features: &DerivedFeatureVector) -> Result<PredictionResult, ArtifactError> {
        if features.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(ArtifactError::NonFinite("derived feature"));
        }

        let scaled = self.scaler.transform(features.as_slice())?;
        if scaled.len() != FEATURE_COUNT {
            return Err(ArtifactError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: scaled.len(),
            });
        }
        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(ArtifactError::NonFinite("scaled feature"));
        }
        debug!("Scaled features: {:?}", scaled);

        let (label, probability) = self.classifier.classify(&scaled)?;
        let outlook = CareerOutlook::from_label(label)?;

        match probability {
            Some(p) if p.is_nan() => return Err(ArtifactError::NonFinite("probability")),
            Some(p) if !(0.0..=1.0).contains(&p) => {
                return Err(ArtifactError::InvalidProbability(p))
            }
            _ => {}
        }

        Ok(PredictionResult {
            outlook,
            probability,
        })
    }

    /// Run the full pipeline for one stat line
    pub fn predict(&self, stats: &RawPlayerStats) -> Result<PredictionReport, ArtifactError> {
        let start = Instant::now();

        let features = derive(stats);
        let result = self.classify(&features)?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            "Prediction: {} (p={:?}, latency={}us)",
            result.outlook.as_str(),
            result.probability,
            latency_us
        );

        Ok(PredictionReport {
            result,
            features,
            advanced: AdvancedStats::from_stats(stats),
            latency_us,
        })
    }
}
