//! SeaORM-backed organization storage.
//!
//! Production persistence for organizations and memberships against
//! Postgres. Enabled with the `database` cargo feature.
//!
//! # Database Schema
//!
//! This store expects the following tables:
//!
//! ```sql
//! CREATE TABLE organizations (
//!     id VARCHAR(36) PRIMARY KEY,
//!     name VARCHAR(100) NOT NULL,
//!     status VARCHAR(20) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE organization_members (
//!     org_id VARCHAR(36) NOT NULL,
//!     user_id VARCHAR(36) NOT NULL,
//!     role VARCHAR(20) NOT NULL,
//!     PRIMARY KEY (org_id, user_id),
//!     FOREIGN KEY (org_id) REFERENCES organizations(id) ON DELETE CASCADE
//! );
//!
//! CREATE INDEX idx_members_user ON organization_members(user_id);
//! ```
//!
//! Organization rows are created by the provisioning pipeline, never by this
//! service; only the `name` and `updated_at` columns are written here.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, Unchanged};
use std::str::FromStr;
use uuid::Uuid;

use super::storage::{MembershipStore, OrganizationStore};
use super::types::{Membership, OrgRole, OrgStatus, Organization};
use crate::error::{ApiError, Result};

mod entity {
    pub mod organization {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "organizations")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: String,
            pub name: String,
            pub status: String,
            pub created_at: DateTimeUtc,
            pub updated_at: DateTimeUtc,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    pub mod membership {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "organization_members")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub org_id: String,
            #[sea_orm(primary_key, auto_increment = false)]
            pub user_id: String,
            pub role: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }
}

use entity::{membership, organization};

/// SeaORM store implementing both organization storage traits.
#[derive(Clone)]
pub struct SeaOrmOrgStore {
    db: DatabaseConnection,
}

impl SeaOrmOrgStore {
    /// Create a new store over an existing database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(err: sea_orm::DbErr) -> ApiError {
    ApiError::internal(format!("database error: {err}"))
}

fn org_from_model(model: organization::Model) -> Result<Organization> {
    Ok(Organization {
        id: Uuid::parse_str(&model.id)
            .map_err(|e| ApiError::internal(format!("invalid organization id in store: {e}")))?,
        name: model.name,
        status: OrgStatus::from_str(&model.status)
            .map_err(|e| ApiError::internal(format!("invalid organization row: {e}")))?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl OrganizationStore for SeaOrmOrgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        organization::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(org_from_model)
            .transpose()
    }

    async fn update(&self, org: &Organization) -> Result<()> {
        // Only the mutable columns are written; id, status and created_at
        // stay untouched in the row.
        let active = organization::ActiveModel {
            id: Unchanged(org.id.to_string()),
            name: Set(org.name.clone()),
            updated_at: Set(org.updated_at),
            ..Default::default()
        };

        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl MembershipStore for SeaOrmOrgStore {
    async fn get_membership(&self, org_id: Uuid, user_id: &str) -> Result<Option<Membership>> {
        let row = membership::Entity::find_by_id((org_id.to_string(), user_id.to_string()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        row.map(|model| {
            Ok(Membership {
                org_id,
                user_id: model.user_id,
                role: OrgRole::from_str(&model.role)
                    .map_err(|e| ApiError::internal(format!("invalid membership row: {e}")))?,
            })
        })
        .transpose()
    }
}
