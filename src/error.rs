use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),

    #[error("Invalid brand directory: {0}")]
    InvalidDirectory(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Brand hierarchy contains a cycle through '{0}'")]
    CyclicHierarchy(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        let (status, severity, code, diagnostics) = match self {
            BrandError::InvalidBundle(_) | BrandError::InvalidDirectory(_) | BrandError::Json(_) => (
                StatusCode::BAD_REQUEST,
                "error",
                "invalid",
                self.to_string(),
            ),
            BrandError::ValidationError(_) | BrandError::CyclicHierarchy(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "error",
                "business-rule",
                self.to_string(),
            ),
            BrandError::UnsupportedFormat(_) => (
                StatusCode::NOT_ACCEPTABLE,
                "error",
                "not-supported",
                self.to_string(),
            ),
            BrandError::Internal(ref err) => {
                tracing::error!(error = %err, "Internal error while converting brands");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error",
                    "exception",
                    "Internal server error".to_string(),
                )
            }
        };

        let operation_outcome = create_operation_outcome(severity, code, &diagnostics);
        (status, Json(operation_outcome)).into_response()
    }
}

pub(crate) fn create_operation_outcome(
    severity: &str,
    code: &str,
    diagnostics: &str,
) -> serde_json::Value {
    json!({
        "resourceType": "OperationOutcome",
        "issue": [{
            "severity": severity,
            "code": code,
            "diagnostics": diagnostics
        }]
    })
}

pub type Result<T> = std::result::Result<T, BrandError>;
