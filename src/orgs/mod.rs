//! Organization resource: domain types, authorization rules, storage and
//! HTTP handlers for `/api/orgs/{orgId}`.

mod error;
mod handlers;
mod manager;
mod memory;
mod storage;
mod types;

#[cfg(feature = "database")]
mod sea_orm_store;

pub use error::OrgError;
pub use handlers::routes;
pub use manager::{MAX_NAME_LEN, OrgManager, validate_name};
pub use memory::InMemoryStore;
pub use storage::{MembershipStore, OrganizationStore};
pub use types::{
    Membership, OrgRole, OrgStatus, Organization, ParseRoleError, ParseStatusError,
    UpdateOrgRequest,
};

#[cfg(feature = "database")]
pub use sea_orm_store::SeaOrmOrgStore;
