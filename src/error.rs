use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    MSG_BAD_REQUEST, MSG_INTERNAL_ERROR, MSG_METHOD_NOT_ALLOWED, MSG_PLANT_NOT_FOUND,
    MSG_ROUTE_NOT_FOUND, MSG_USER_NOT_FOUND,
};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Plant not found")]
    PlantNotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    /// Shorthand for a validation failure with an internal-only detail message
    pub fn validation(detail: impl Into<String>) -> Self {
        AppError::Validation(detail.into())
    }

    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound | AppError::PlantNotFound | AppError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Message sent to the client. Details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Database(_) => MSG_INTERNAL_ERROR,
            AppError::Validation(_) => MSG_BAD_REQUEST,
            AppError::UserNotFound => MSG_USER_NOT_FOUND,
            AppError::PlantNotFound => MSG_PLANT_NOT_FOUND,
            AppError::RouteNotFound => MSG_ROUTE_NOT_FOUND,
            AppError::MethodNotAllowed => MSG_METHOD_NOT_ALLOWED,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("invalid query string: {}", rejection.body_text()))
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Validation(detail) => tracing::warn!("Rejected request: {}", detail),
            _ => {}
        }

        let body = Json(json!({
            "msg": self.public_message()
        }));

        (self.status(), body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_generic_bad_request() {
        let err = AppError::validation("username already taken: robert_plant");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "bad request");
    }

    #[test]
    fn test_not_found_variants() {
        assert_eq!(AppError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UserNotFound.public_message(), "user not found");
        assert_eq!(AppError::PlantNotFound.public_message(), "plant not found");
        assert_eq!(AppError::RouteNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_method_not_allowed() {
        let response = AppError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }
}
