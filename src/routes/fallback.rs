use crate::error::AppError;

/// Answers any verb a resource path does not define
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Answers any path the router does not know
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
