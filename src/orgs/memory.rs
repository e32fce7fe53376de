//! In-memory store for tests and local development.
//!
//! Cloning shares the same underlying data (uses `Arc` internally), so a
//! test can keep a handle for seeding while the manager holds its own.

use super::storage::{MembershipStore, OrganizationStore};
use super::types::{Membership, Organization};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

struct InMemoryStoreInner {
    orgs: RwLock<HashMap<Uuid, Organization>>,
    memberships: RwLock<HashMap<(Uuid, String), Membership>>,
}

/// In-memory store implementing both organization storage traits.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemoryStoreInner {
                orgs: RwLock::new(HashMap::new()),
                memberships: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Insert an organization directly (for test setup).
    pub fn insert_org(&self, org: Organization) {
        self.inner.orgs.write().unwrap().insert(org.id, org);
    }

    /// Insert a membership directly (for test setup).
    pub fn insert_membership(&self, membership: Membership) {
        let key = (membership.org_id, membership.user_id.clone());
        self.inner.memberships.write().unwrap().insert(key, membership);
    }
}

#[async_trait]
impl OrganizationStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        Ok(self.inner.orgs.read().unwrap().get(&id).cloned())
    }

    async fn update(&self, org: &Organization) -> Result<()> {
        let mut orgs = self.inner.orgs.write().unwrap();
        if let Some(existing) = orgs.get_mut(&org.id) {
            *existing = org.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipStore for InMemoryStore {
    async fn get_membership(&self, org_id: Uuid, user_id: &str) -> Result<Option<Membership>> {
        Ok(self
            .inner
            .memberships
            .read()
            .unwrap()
            .get(&(org_id, user_id.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{OrgRole, OrgStatus};
    use super::*;
    use chrono::Utc;

    fn sample_org() -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: "Sample".to_string(),
            status: OrgStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_and_update_org() {
        let store = InMemoryStore::new();
        let mut org = sample_org();
        store.insert_org(org.clone());

        let found = store.find_by_id(org.id).await.unwrap().unwrap();
        assert_eq!(found, org);

        org.name = "Renamed".to_string();
        store.update(&org).await.unwrap();
        let found = store.find_by_id(org.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
    }

    #[tokio::test]
    async fn test_missing_org_is_none() {
        let store = InMemoryStore::new();
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_membership_lookup_is_scoped_to_org() {
        let store = InMemoryStore::new();
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();
        store.insert_membership(Membership {
            org_id: org_a,
            user_id: "user-1".to_string(),
            role: OrgRole::Admin,
        });

        assert!(store.get_membership(org_a, "user-1").await.unwrap().is_some());
        assert!(store.get_membership(org_b, "user-1").await.unwrap().is_none());
        assert!(store.get_membership(org_a, "user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        let org = sample_org();
        store.insert_org(org.clone());

        assert!(clone.find_by_id(org.id).await.unwrap().is_some());
    }
}
