/// Shared types used across the codebase

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::database::StoreError;

/// Identifier for users and products.
///
/// Ids reach the service from several places (path parameters, token claims,
/// stored references) and in several textual shapes. Every comparison goes
/// through this type, so two ids are equal exactly when their canonical
/// (lowercase, hyphenated) forms are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse any textual UUID form: hyphenated, simple, braced or URN, in any case.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Parse an id that is about to be used for a lookup.
    ///
    /// A malformed value is reported the way the storage layer reports it,
    /// so handlers surface it exactly like any other failed lookup.
    pub fn parse_for_lookup(raw: &str) -> Result<Self, StoreError> {
        Self::parse(raw).ok_or_else(|| StoreError::Cast {
            value: raw.to_string(),
        })
    }

    /// Canonical string form used for display, serialization and comparison
    pub fn canonical(&self) -> String {
        self.0.as_hyphenated().to_string()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record id: {}", raw)))
    }
}

/// Coarse privilege label on a user. Only `admin` grants anything extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0b5c7e1a-3f2d-4c8e-9a61-2d4f8e7c1b90";

    #[test]
    fn equivalent_representations_compare_equal() {
        let canonical = RecordId::parse(ID).unwrap();
        let upper = RecordId::parse(&ID.to_uppercase()).unwrap();
        let simple = RecordId::parse(&ID.replace('-', "")).unwrap();
        let braced = RecordId::parse(&format!("{{{}}}", ID)).unwrap();
        let urn = RecordId::parse(&format!("urn:uuid:{}", ID)).unwrap();

        assert_eq!(canonical, upper);
        assert_eq!(canonical, simple);
        assert_eq!(canonical, braced);
        assert_eq!(canonical, urn);
        assert_eq!(upper.canonical(), ID);
    }

    #[test]
    fn malformed_id_is_a_cast_failure() {
        let err = RecordId::parse_for_lookup("not-a-valid-id").unwrap_err();
        assert!(matches!(err, StoreError::Cast { ref value } if value == "not-a-valid-id"));
    }

    #[test]
    fn serializes_as_canonical_string() {
        let id = RecordId::parse(&ID.to_uppercase()).unwrap();
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(ID));

        let back: RecordId = serde_json::from_value(serde_json::json!(ID)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn only_admin_is_special() {
        assert!(Role::from("admin").is_admin());
        assert!(!Role::from("Admin").is_admin());
        assert!(!Role::from("user").is_admin());
        assert!(!Role::from("moderator").is_admin());
        assert_eq!(Role::default(), Role::User);
    }
}
