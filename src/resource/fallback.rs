use crate::error::AppError;

pub const URL_NOT_FOUND: &str = "The requested URL was not found on the server.";
pub const METHOD_NOT_ALLOWED: &str = "The method is not allowed for the requested URL.";

/// Handler for routes that do not exist
pub async fn not_found() -> AppError {
    AppError::NotFound(URL_NOT_FOUND.to_string())
}

/// Handler for known routes hit with an unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(METHOD_NOT_ALLOWED.to_string())
}
