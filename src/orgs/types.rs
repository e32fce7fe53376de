//! Organization domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An organization (tenant): the billing and access boundary of the Voxanne
/// dashboard.
///
/// Rows are created by an out-of-band provisioning process; this service only
/// reads them and updates `name`. All timestamps serialize as RFC 3339
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier, immutable.
    pub id: uuid::Uuid,
    /// Human-readable display name. Mutable by admins only.
    pub name: String,
    /// Lifecycle status. Read-only through this API.
    pub status: OrgStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Organization lifecycle status.
///
/// Transitions are owned by a separate administrative process; this service
/// treats the value as opaque and never writes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl OrgStatus {
    /// Get the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

/// Error returned when parsing a status string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid_value: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid status: '{}' (expected: active, inactive, or suspended)",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for OrgStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ParseStatusError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrgStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Membership role within an organization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    /// Administrator: may rename the organization.
    Admin,
    /// Regular member: read access only.
    #[default]
    Member,
}

impl OrgRole {
    /// Get the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Check if this role can change organization settings (the `name`).
    #[must_use]
    pub fn can_manage_settings(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Error returned when parsing a role string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    invalid_value: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid role: '{}' (expected: admin or member)",
            self.invalid_value
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for OrgRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in one organization.
///
/// The existence of this row is the sole source of access: a user without a
/// membership has no access to the organization, not even read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub org_id: uuid::Uuid,
    pub user_id: String,
    pub role: OrgRole,
}

/// Update request body for `PUT /api/orgs/{orgId}`.
///
/// Only `name` is honored. Any other body content (including `status`) is
/// captured here so the manager can log and discard it, rather than silently
/// dropping fields at the deserialization boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrgRequest {
    pub name: Option<String>,
    #[serde(flatten)]
    pub ignored: serde_json::Map<String, serde_json::Value>,
}
