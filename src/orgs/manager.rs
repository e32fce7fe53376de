//! Organization manager.
//!
//! Implements the ordered authorization and validation pipeline for the
//! organization resource. Every check is evaluated in a fixed order and the
//! first failure is the terminal outcome for that request; the update write
//! only happens after every precondition has passed.

use super::error::{OrgError, Result};
use super::storage::{MembershipStore, OrganizationStore};
use super::types::{Organization, UpdateOrgRequest};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Maximum organization name length in characters, after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Organization manager over pluggable stores.
///
/// Stateless between calls: all durable state lives in the stores, so the
/// manager is safe to share across concurrent requests.
pub struct OrgManager {
    org_store: Arc<dyn OrganizationStore>,
    membership_store: Arc<dyn MembershipStore>,
}

impl OrgManager {
    /// Create a new organization manager.
    #[must_use]
    pub fn new(
        org_store: Arc<dyn OrganizationStore>,
        membership_store: Arc<dyn MembershipStore>,
    ) -> Self {
        Self {
            org_store,
            membership_store,
        }
    }

    /// Read an organization on behalf of a user.
    ///
    /// Check order: existence (not found), then membership (forbidden).
    /// A pure read: no side effects.
    #[instrument(skip(self))]
    pub async fn get(&self, org_id: Uuid, user_id: &str) -> Result<Organization> {
        let org = self
            .org_store
            .find_by_id(org_id)
            .await?
            .ok_or(OrgError::NotFound { org_id })?;

        self.membership_store
            .get_membership(org_id, user_id)
            .await?
            .ok_or(OrgError::NotMember)?;

        Ok(org)
    }

    /// Rename an organization on behalf of a user.
    ///
    /// Check order: existence, then admin role, then body validation. A
    /// non-admin member and a non-member get the same `AdminRequired`
    /// outcome. Only `name` and `updated_at` change; `status`, `id` and
    /// `created_at` are never written, whatever the request body contains.
    #[instrument(skip(self, request))]
    pub async fn rename(
        &self,
        org_id: Uuid,
        user_id: &str,
        request: UpdateOrgRequest,
    ) -> Result<Organization> {
        // Existence before membership: a missing organization is 404 for
        // everyone, member or not.
        let mut org = self
            .org_store
            .find_by_id(org_id)
            .await?
            .ok_or(OrgError::NotFound { org_id })?;

        let membership = self
            .membership_store
            .get_membership(org_id, user_id)
            .await?
            .ok_or(OrgError::AdminRequired)?;

        if !membership.role.can_manage_settings() {
            debug!(%org_id, user_id, role = %membership.role, "Rename rejected: not an admin");
            return Err(OrgError::AdminRequired);
        }

        if !request.ignored.is_empty() {
            let fields: Vec<&str> = request.ignored.keys().map(String::as_str).collect();
            debug!(%org_id, ?fields, "Discarding read-only fields from update request");
        }

        let name = request.name.as_deref().ok_or(OrgError::NameRequired)?;
        let name = validate_name(name)?;

        org.name = name;
        org.updated_at = Utc::now();
        self.org_store.update(&org).await?;

        info!(%org_id, user_id, "Organization renamed");

        Ok(org)
    }
}

/// Validate and normalize an organization name.
///
/// Trims surrounding whitespace, then rejects empty and over-long values.
/// Exactly [`MAX_NAME_LEN`] characters is valid.
pub fn validate_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OrgError::NameEmpty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(OrgError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(trimmed.to_string())
}
