//! Storage traits for organizations and memberships.
//!
//! Implement these for your database layer. Both traits are object-safe so
//! the manager can hold them as `Arc<dyn ...>` and the HTTP layer stays
//! independent of the backing store.

use super::types::{Membership, Organization};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Organization storage operations.
///
/// Store failures surface as `Internal` errors; the caller never retries.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Find an organization by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>>;

    /// Persist new field values for an existing organization.
    ///
    /// The write must be a single-row atomic update; concurrent updates to
    /// the same row resolve as last-write-wins in the store.
    async fn update(&self, org: &Organization) -> Result<()>;
}

/// Membership storage operations.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Get a user's membership in an organization, if any.
    async fn get_membership(&self, org_id: Uuid, user_id: &str) -> Result<Option<Membership>>;
}
