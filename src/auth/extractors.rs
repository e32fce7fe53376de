use super::token::TokenExtractor;
use crate::app::AppState;
use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The authenticated caller, extracted from the bearer token.
///
/// Handlers that need to run checks before authentication take this as
/// `Result<CurrentUser, ApiError>` and decide when to surface the rejection.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Subject claim of the verified token.
    pub user_id: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = TokenExtractor::from_header(parts)?;
        let claims = state.verifier.verify(&token)?;

        Ok(CurrentUser {
            user_id: claims.sub,
        })
    }
}
