//! # Identifier Newtypes
//!
//! Every entity identifier in the workspace is a distinct newtype over
//! `uuid::Uuid`. Mixing up a `MerchantId` and an `AppId` is a compile error,
//! not a production incident.
//!
//! `Jurisdiction` is a string newtype for regulatory jurisdiction codes
//! (`"EU"`, `"US-CA"`, `"CA"`, …) — these are catalog keys, not UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_newtype!(
    /// Identifier of a merchant tenant.
    MerchantId
);
uuid_newtype!(
    /// Identifier of a third-party app installed by a merchant.
    AppId
);
uuid_newtype!(
    /// Identifier of a regulatory rule in the catalog.
    RuleId
);
uuid_newtype!(
    /// Identifier of a compliance audit record.
    AuditId
);
uuid_newtype!(
    /// Identifier of a monitoring alert.
    AlertId
);

/// A regulatory jurisdiction code (e.g., `"EU"`, `"US-CA"`, `"CA"`).
///
/// Stored uppercase-as-given; comparison is exact. Jurisdiction codes are
/// catalog data, so no closed enum — new jurisdictions arrive with new
/// rule packs, not with new compiler releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    /// Wrap a jurisdiction code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The jurisdiction code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Jurisdiction {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_per_call() {
        assert_ne!(MerchantId::new(), MerchantId::new());
    }

    #[test]
    fn test_uuid_roundtrip() {
        let raw = Uuid::new_v4();
        let id = AppId::from_uuid(raw);
        assert_eq!(*id.as_uuid(), raw);
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = RuleId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: RuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_jurisdiction_display() {
        let j = Jurisdiction::new("US-CA");
        assert_eq!(j.to_string(), "US-CA");
        assert_eq!(j.as_str(), "US-CA");
    }
}
