use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures while building the regional dataset.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("upstream registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no regional cities in upstream response")]
    NoRegionalData,
}

/// Errors returned by the HTTP API. Bodies use the `{"detail": ...}` shape.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("City not found")]
    CityNotFound,

    #[error("Error fetching city data")]
    DataUnavailable(#[source] EngineError),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::DataUnavailable(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::CityNotFound => StatusCode::NOT_FOUND,
            ApiError::DataUnavailable(cause) => {
                tracing::error!(error = %cause, "City data unavailable");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
