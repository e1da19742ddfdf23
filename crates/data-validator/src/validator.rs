//! Data Validator for Range Checking

use crate::error::ValidationError;
use feature_engine::{derive, DerivedFeatureVector, RawPlayerStats, StatField};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Valid range for counting stats and per-game rates
    pub count_range: (f64, f64),
    /// Valid range for shooting percentages
    pub percentage_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            count_range: (0.0, f64::MAX),
            percentage_range: (0.0, 100.0),
        }
    }
}

/// Contract checks for raw player statistics
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range. Non-finite values never pass.
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() || value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate one statistic using the range for its kind
    pub fn validate_field(&self, field: StatField, value: f64) -> Result<(), ValidationError> {
        let range = if field.is_percentage() {
            self.config.percentage_range
        } else {
            self.config.count_range
        };
        self.validate_range(field.key(), value, range)
    }

    /// Validate a full stat line, stopping at the first bad field.
    ///
    /// Also rejects lines whose derived features overflow, e.g. huge but
    /// finite `GP * PTS`, since the classifier cannot score them.
    pub fn validate(&self, stats: &RawPlayerStats) -> Result<(), ValidationError> {
        StatField::ALL
            .into_iter()
            .try_for_each(|field| self.validate_field(field, stats.get(field)))?;
        self.validate_features(&derive(stats))
    }

    /// Every derived feature must be finite
    pub fn validate_features(&self, features: &DerivedFeatureVector) -> Result<(), ValidationError> {
        match features.named().find(|(_, value)| !value.is_finite()) {
            Some((feature, value)) => {
                debug!("Derived feature {} is {}", feature, value);
                Err(ValidationError::NonFiniteFeature(feature))
            }
            None => Ok(()),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
