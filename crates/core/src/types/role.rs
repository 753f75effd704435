//! Account roles.

use serde::{Deserialize, Serialize};

/// Role attached to a user profile by the server.
///
/// Only `admin` changes client behaviour; every other value routes like a
/// customer. Unknown values are kept verbatim so they survive a round trip
/// through durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    Customer,
    Other(String),
}

impl Role {
    /// Whether this role grants the admin area.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Self::Admin,
            "customer" => Self::Customer,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_owned(),
            Role::Customer => "customer".to_owned(),
            Role::Other(other) => other,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_wire() {
        let roles: Vec<Role> = serde_json::from_str(r#"["admin","customer","vendor"]"#).unwrap();
        assert_eq!(
            roles,
            vec![Role::Admin, Role::Customer, Role::Other("vendor".into())]
        );
    }

    #[test]
    fn test_only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Customer.is_admin());
        assert!(!Role::Other("Admin".into()).is_admin());
    }

    #[test]
    fn test_unknown_role_survives_round_trip() {
        let json = serde_json::to_string(&Role::Other("vendor".into())).unwrap();
        assert_eq!(json, "\"vendor\"");
    }
}
