use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::create_operation_outcome;

/// JSON body extractor that rejects with an OperationOutcome instead of
/// axum's plain-text rejection
pub struct FhirJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FhirJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FhirJson(value)),
            Err(rejection) => {
                let code = match rejection {
                    JsonRejection::MissingJsonContentType(_) => "not-supported",
                    JsonRejection::BytesRejection(_) => "exception",
                    _ => "invalid",
                };
                tracing::debug!(code, reason = %rejection.body_text(), "Rejected request body");

                let operation_outcome =
                    create_operation_outcome("error", code, &rejection.body_text());
                Err((rejection.status(), Json(operation_outcome)).into_response())
            }
        }
    }
}
