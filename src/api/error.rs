use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::auth::AuthError;
use crate::inventory_actor::InventoryError;
use crate::user_actor::DirectoryError;

/// An error ready to leave the service: an HTTP status plus the
/// `{"error": {"code", "message", "field"?}}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    field: Option<&'static str>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn validation(message: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            field,
            ..Self::new(StatusCode::BAD_REQUEST, "VALIDATION", message)
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// Internal failures log the detail and serve a generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        if let Some(field) = self.field {
            body["error"]["field"] = json!(field);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Request-body extractor that reports JSON rejections in the standard
/// error body.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

// Malformed and mistyped bodies are client errors, not axum's 422/415 split.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text(), None)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound(_) => ApiError::not_found("Product not found"),
            InventoryError::Validation { field, message } => {
                ApiError::validation(message, Some(field))
            }
            InventoryError::DuplicateBarcode(_) => ApiError::conflict("Barcode already exists"),
            InventoryError::ActorCommunicationError(detail) => ApiError::internal(detail),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::MissingCredentials | DirectoryError::MissingFields => {
                ApiError::validation(err.to_string(), None)
            }
            DirectoryError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            DirectoryError::AlreadyExists => ApiError::conflict("User already exists"),
            DirectoryError::ActorCommunicationError(detail) => ApiError::internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::unauthorized("No token provided"),
            AuthError::InvalidToken => ApiError::forbidden("Invalid token"),
            AuthError::TokenCreation => ApiError::internal(err),
        }
    }
}
