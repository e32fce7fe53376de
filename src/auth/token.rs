use crate::error::ApiError;
use axum::http::request::Parts;

/// Extracts bearer token from request headers
pub struct TokenExtractor;

impl TokenExtractor {
    /// Extract token from Authorization header
    pub fn from_header(parts: &Parts) -> Result<String, ApiError> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::unauthorized("Authentication required: missing authorization header")
            })?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::unauthorized(
                "Authentication required: invalid authorization header format. Expected: Bearer <token>",
            ));
        }

        let token = auth_header.trim_start_matches("Bearer ").to_string();

        if token.is_empty() {
            return Err(ApiError::unauthorized(
                "Authentication required: empty bearer token",
            ));
        }

        Ok(token)
    }
}
