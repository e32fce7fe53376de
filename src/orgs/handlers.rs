//! HTTP handlers for the organization resource.
//!
//! Check ordering is part of the contract: the path identifier is validated
//! before the credential is consulted, which is why the auth extractor and
//! the JSON body arrive as deferred `Result`s instead of rejecting during
//! extraction.

use super::types::{Organization, UpdateOrgRequest};
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use uuid::Uuid;

/// Routes for the organization resource.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/orgs/{org_id}", get(get_org).put(update_org))
}

/// `GET /api/orgs/{orgId}` — read one organization.
async fn get_org(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    user: Result<CurrentUser, ApiError>,
) -> Result<Json<Organization>, ApiError> {
    let org_id = parse_org_id(&org_id)?;
    let user = user?;

    let org = state.orgs.get(org_id, &user.user_id).await?;
    Ok(Json(org))
}

/// `PUT /api/orgs/{orgId}` — update the organization name.
async fn update_org(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    user: Result<CurrentUser, ApiError>,
    body: Result<Json<UpdateOrgRequest>, JsonRejection>,
) -> Result<Json<Organization>, ApiError> {
    let org_id = parse_org_id(&org_id)?;
    let user = user?;
    let Json(request) =
        body.map_err(|rejection| ApiError::bad_request(format!("invalid request body: {rejection}")))?;

    let org = state.orgs.rename(org_id, &user.user_id, request).await?;
    Ok(Json(org))
}

fn parse_org_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("organization id must be a valid UUID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_org_id() {
        assert!(parse_org_id("550e8400-e29b-41d4-a716-446655440000").is_ok());

        for bad in ["", "not-a-uuid", "550e8400", "550e8400-e29b-41d4-a716-44665544000g"] {
            let err = parse_org_id(bad).unwrap_err();
            assert!(err.to_string().contains("UUID"), "input: {bad:?}");
        }
    }
}
