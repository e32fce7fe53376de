//! Organization error types.

use crate::error::ApiError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during organization operations.
///
/// Each variant is a terminal outcome of the ordered check pipeline in
/// [`OrgManager`](super::OrgManager); the conversion into [`ApiError`] fixes
/// the HTTP status each one maps to.
#[derive(Debug, Error)]
pub enum OrgError {
    /// Organization does not exist.
    #[error("Organization not found: {org_id}")]
    NotFound {
        /// The ID that was not found.
        org_id: Uuid,
    },

    /// Authenticated user has no membership in the organization.
    #[error("You are not a member of this organization")]
    NotMember,

    /// Caller is not an admin of the organization (or not a member at all;
    /// the two are indistinguishable in the response).
    #[error("Only organization administrators can update this organization")]
    AdminRequired,

    /// Update body did not contain a `name` field.
    #[error("name is required")]
    NameRequired,

    /// `name` was empty after trimming.
    #[error("name cannot be empty")]
    NameEmpty,

    /// `name` exceeded the length limit after trimming.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] ApiError),
}

impl OrgError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(org_id: Uuid) -> Self {
        Self::NotFound { org_id }
    }
}

impl From<OrgError> for ApiError {
    fn from(err: OrgError) -> Self {
        match err {
            OrgError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            OrgError::NotMember | OrgError::AdminRequired => ApiError::Forbidden(err.to_string()),
            OrgError::NameRequired | OrgError::NameEmpty | OrgError::NameTooLong { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            OrgError::Storage(inner) => inner,
        }
    }
}

/// Result type for organization operations.
pub type Result<T> = std::result::Result<T, OrgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_id() {
        let org_id = Uuid::new_v4();
        let err = OrgError::not_found(org_id);
        assert!(err.to_string().contains(&org_id.to_string()));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_membership_errors_map_to_forbidden() {
        assert!(matches!(
            ApiError::from(OrgError::NotMember),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(OrgError::AdminRequired),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_name_errors_map_to_bad_request() {
        for err in [
            OrgError::NameRequired,
            OrgError::NameEmpty,
            OrgError::NameTooLong { max: 100 },
        ] {
            assert!(matches!(ApiError::from(err), ApiError::BadRequest(_)));
        }
    }

    #[test]
    fn test_storage_errors_pass_through() {
        let err = OrgError::Storage(ApiError::internal("db down"));
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }

    #[test]
    fn test_admin_required_mentions_administrators() {
        assert!(OrgError::AdminRequired.to_string().contains("administrator"));
    }
}
