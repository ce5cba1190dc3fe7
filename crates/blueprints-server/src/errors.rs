use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use blueprints_core::BlueprintError;

/// HTTP face of a [`BlueprintError`].
#[derive(Debug)]
pub struct ApiError(pub BlueprintError);

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'static str,
    pub message: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BlueprintError::NotFound(_) => StatusCode::NOT_FOUND,
            BlueprintError::Conflict(_) => StatusCode::CONFLICT,
            BlueprintError::Validation(_) => StatusCode::BAD_REQUEST,
            BlueprintError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<BlueprintError> for ApiError {
    fn from(err: BlueprintError) -> Self {
        Self(err)
    }
}

/// Unparseable or mistyped request bodies are validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BlueprintError::Validation(format!(
            "malformed blueprint body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(kind = self.0.error_kind(), message = self.0.message(), "request failed");
        } else {
            tracing::debug!(kind = self.0.error_kind(), message = self.0.message(), "request rejected");
        }
        let body = ErrorBody {
            error: self.0.error_kind(),
            message: self.0.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_kind() {
        let cases = [
            (BlueprintError::author_not_found("x"), StatusCode::NOT_FOUND),
            (BlueprintError::already_exists("a", "b"), StatusCode::CONFLICT),
            (BlueprintError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                BlueprintError::ServiceUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn response_carries_status() {
        let resp = ApiError(BlueprintError::already_exists("a", "b")).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
