//! NBA Career Predictor API Server
//!
//! HTML form and JSON dashboard endpoints over the shared inference gateway.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use data_validator::Validator;
use feature_engine::RawPlayerStats;
use inference_engine::{InferenceGateway, PredictionReport};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub mod error;
mod page;
mod routes;
pub mod settings;
pub mod telemetry;

pub use error::{ApiError, ErrorResponse};
pub use settings::{LogFormat, Settings};
pub use telemetry::{init_logging, install_metrics};

/// Application state shared across handlers
pub struct AppState {
    /// Loaded scaler and classifier
    pub gateway: Arc<InferenceGateway>,
    pub validator: Validator,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(gateway: Arc<InferenceGateway>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            gateway,
            validator: Validator::default(),
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Validate a parsed stat line and run it through the gateway
    pub fn predict(&self, stats: &RawPlayerStats) -> Result<PredictionReport, ApiError> {
        let result = self
            .validator
            .validate(stats)
            .map_err(ApiError::from)
            .and_then(|()| self.gateway.predict(stats).map_err(ApiError::from));

        match &result {
            Ok(report) => {
                debug!("Predicted {}", report.result.outlook.as_str());
                telemetry::record_prediction(report.result.outlook, report.latency_us);
            }
            Err(e) => telemetry::record_failure(e.code()),
        }
        result
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub classifier: String,
    pub supports_probability: bool,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::index))
        .route("/predict", post(routes::form::submit))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/inputs", get(routes::predictions::get_inputs))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        classifier: state.gateway.classifier_kind().to_string(),
        supports_probability: state.gateway.supports_proba(),
    })
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Load artifacts and run the server until it exits.
///
/// Fails before binding if the artifacts cannot be loaded.
pub async fn run_server(settings: &Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let gateway = inference_engine::global::init(&settings.artifacts)?;

    let metrics = match install_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable: {}", e);
            None
        }
    };

    let state = Arc::new(AppState::new(gateway, metrics));
    let app = create_router(state);

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::predictions::PredictResponse;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use inference_engine::{Classifier, LinearClassifier, LinearKind, StandardScaler};
    use tower::ServiceExt;

    const FORM_BODY: &str =
        "GP=70&PTS=15&MIN=25&FG%25=45&FT%25=75&OREB=1.5&DREB=4&AST=3.5&STL=1&BLK=0.5&TOV=2";

    fn state_with_model(kind: LinearKind, coefficients: Vec<f64>, intercept: f64) -> Arc<AppState> {
        let scaler = StandardScaler::new(vec![0.0; 8], vec![1.0; 8]).unwrap();
        let classifier: Box<dyn Classifier> =
            Box::new(LinearClassifier::new(kind, coefficients, intercept, [0, 1]).unwrap());
        let gateway = InferenceGateway::new(Box::new(scaler), classifier).unwrap();
        Arc::new(AppState::new(Arc::new(gateway), None))
    }

    /// Classifier keyed on season total points, long career above `threshold`
    fn state_with(kind: LinearKind, threshold: f64) -> Arc<AppState> {
        let mut coefficients = vec![0.0; 8];
        coefficients[2] = 1.0;
        state_with_model(kind, coefficients, -threshold)
    }

    fn app() -> Router {
        create_router(state_with(LinearKind::LogisticRegression, 1000.0))
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn reference_json() -> serde_json::Value {
        serde_json::json!({
            "GP": 70, "PTS": 15, "MIN": 25, "FG%": 45, "FT%": 75, "OREB": 1.5,
            "DREB": 4, "AST": 3.5, "STL": 1, "BLK": 0.5, "TOV": 2
        })
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("name=\"GP\""));
        assert!(html.contains("name=\"TOV\""));
    }

    #[tokio::test]
    async fn test_form_prediction() {
        let response = app().oneshot(form_request(FORM_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("The player will have a Career &gt; 5 years"));
        assert!(html.contains("advanced-stats"));
    }

    #[tokio::test]
    async fn test_form_short_career() {
        let app = create_router(state_with(LinearKind::LogisticRegression, 2000.0));
        let response = app.oneshot(form_request(FORM_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Career ≤ 5 years"));
    }

    #[tokio::test]
    async fn test_form_parse_error() {
        let body = FORM_BODY.replace("PTS=15", "PTS=lots");
        let response = app().oneshot(form_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_string(response).await;
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("PTS"));
        // Submitted values are echoed back
        assert!(html.contains("value=\"lots\""));
    }

    #[tokio::test]
    async fn test_json_prediction() {
        let response = app().oneshot(json_request(reference_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: PredictResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.label, 1);
        assert_eq!(body.prediction, "Career > 5 years");
        assert!(body.probability.unwrap() > 0.5);

        let names: Vec<_> = body.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, feature_engine::FEATURE_NAMES.to_vec());
        assert!((body.features[2].value - 1050.0).abs() < 1e-9);
        assert!((body.features[4].value - 7.0).abs() < 1e-9);
        assert_eq!(body.advanced_stats.rebounds, 5.5);
    }

    #[tokio::test]
    async fn test_json_accepts_numeric_strings() {
        let mut body = reference_json();
        body["MIN"] = serde_json::json!("0");
        let response = app().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: PredictResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.features[3].value, 0.0);
        assert_eq!(body.features[7].value, 0.0);
    }

    #[tokio::test]
    async fn test_json_probability_omitted_for_svc() {
        let app = create_router(state_with(LinearKind::LinearSvc, 1000.0));
        let response = app.oneshot(json_request(reference_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["label"], 1);
        assert!(body.get("probability").is_none());
    }

    #[tokio::test]
    async fn test_json_missing_field() {
        let mut body = reference_json();
        body.as_object_mut().unwrap().remove("DREB");
        let response = app().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.error, "missing_field");
        assert!(body.message.contains("DREB"));
    }

    #[tokio::test]
    async fn test_json_out_of_range() {
        let mut body = reference_json();
        body["FG%"] = serde_json::json!(120);
        let response = app().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.error, "out_of_range");
    }

    #[tokio::test]
    async fn test_json_overflowing_features_rejected() {
        // Mixed-sign weights turn two overflowed features into inf - inf
        let mut coefficients = vec![0.0; 8];
        coefficients[2] = 1.0;
        coefficients[4] = -1.0;

        for kind in [LinearKind::LogisticRegression, LinearKind::LinearSvc] {
            let app = create_router(state_with_model(kind, coefficients.clone(), 0.0));
            let mut body = reference_json();
            body["GP"] = serde_json::json!(1e200);
            body["PTS"] = serde_json::json!(1e200);
            body["STL"] = serde_json::json!(1e308);
            body["BLK"] = serde_json::json!(1e308);

            let response = app.oneshot(json_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", kind);

            let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body.error, "non_finite_feature");
            assert!(body.message.contains("TOTAL_POINTS"));
        }
    }

    #[tokio::test]
    async fn test_form_overflowing_features_rejected() {
        let body = FORM_BODY.replace("GP=70", "GP=1e200").replace("PTS=15", "PTS=1e200");
        let response = app().oneshot(form_request(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_string(response).await;
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("TOTAL_POINTS"));
    }

    #[tokio::test]
    async fn test_inputs_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/api/v1/inputs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let fields = body.as_array().unwrap();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0]["key"], "GP");
        assert_eq!(fields[0]["max"], 82.0);
        assert_eq!(fields[10]["min"], 0.1);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["classifier"], "logistic_regression");
        assert_eq!(body["supports_probability"], true);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
