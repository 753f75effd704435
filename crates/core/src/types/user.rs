//! User profile as returned by the auth service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Email, Role, UserId};

/// Server-authoritative profile of the signed-in user.
///
/// Read-only on the client. Fields the client does not model are kept in
/// `extra` so the profile can be mirrored into durable storage without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Create a profile with no optional fields set.
    #[must_use]
    pub fn new(id: impl Into<UserId>, first_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: None,
            email: None,
            role,
            extra: Map::new(),
        }
    }

    /// Whether this user should land in the admin area.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
