//! Prediction Routes

use axum::{extract::State, Json};
use data_validator::{parse_values, FieldBounds, RawValue};
use feature_engine::{AdvancedStats, StatField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// One derived feature, in model input order
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f64,
}

/// Response for the prediction endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Raw class label: 1 for a long career, 0 otherwise
    pub label: i64,
    /// Human-readable verdict
    pub prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    pub features: Vec<FeatureValue>,
    pub advanced_stats: AdvancedStats,
    pub latency_us: u64,
}

/// Input field description for dashboard clients
#[derive(Debug, Serialize)]
pub struct InputField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub bounds: FieldBounds,
}

/// Predict from a JSON body of the 11 statistics
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HashMap<String, RawValue>>,
) -> Result<Json<PredictResponse>, ApiError> {
    let report = parse_values(&body)
        .map_err(ApiError::from)
        .and_then(|stats| state.predict(&stats))
        .map_err(|e| {
            warn!("Prediction request rejected: {}", e);
            e
        })?;

    let outlook = report.result.outlook;
    Ok(Json(PredictResponse {
        label: outlook.label(),
        prediction: outlook.headline().to_string(),
        probability: report.result.probability,
        features: report
            .features
            .named()
            .map(|(name, value)| FeatureValue {
                name: name.to_string(),
                value,
            })
            .collect(),
        advanced_stats: report.advanced,
        latency_us: report.latency_us,
    }))
}

/// List the expected inputs with their form bounds
pub async fn get_inputs() -> Json<Vec<InputField>> {
    Json(
        StatField::ALL
            .iter()
            .map(|field| InputField {
                key: field.key(),
                label: field.label(),
                bounds: FieldBounds::for_field(*field),
            })
            .collect(),
    )
}
