//! Response envelope and error → status mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grc_core::errors::{GrcError, GrcErrorCode, StorageError, ValidationError};
use serde::Serialize;

/// `{success, message?, count?, data?, error?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::data(items)
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
            error: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Any failure a handler can return.
#[derive(Debug)]
pub struct ApiError(pub GrcError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GrcError::Validation(_) => StatusCode::BAD_REQUEST,
            GrcError::NotFound { .. } => StatusCode::NOT_FOUND,
            GrcError::Conflict { .. }
            | GrcError::Storage(StorageError::ConstraintViolation { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GrcError> for ApiError {
    fn from(err: GrcError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::Malformed(rejection.body_text()).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ValidationError::Malformed(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::Malformed(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, code = self.0.error_code(), "request failed");
            format!("Internal server error: {}", self.0)
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "request rejected");
            self.0.to_string()
        };

        let body = ApiResponse::<()> {
            success: false,
            message: Some(message),
            count: None,
            data: None,
            error: Some(self.0.error_code()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GrcError::from(ValidationError::Required { field: "description" }), 400),
            (GrcError::not_found("risk", 4), 404),
            (GrcError::conflict("link pinned"), 409),
            (
                GrcError::from(StorageError::ConstraintViolation {
                    message: "unique".into(),
                }),
                409,
            ),
            (
                GrcError::from(StorageError::SqliteError {
                    message: "disk I/O error".into(),
                }),
                500,
            ),
            (GrcError::Internal("boom".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status().as_u16(), status);
        }
    }

    #[test]
    fn test_list_counts_items() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body["count"], 3);
        assert_eq!(body["success"], true);
        assert!(body.get("error").is_none());
    }
}
