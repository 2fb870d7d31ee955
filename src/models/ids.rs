//! Strongly-typed ID wrappers for stored records
//!
//! Ids are assigned by the record store when a record is first added.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Short form shown in listings, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Whether a user-typed identifier refers to this id.
            ///
            /// Accepts the full UUID, the short form, or a bare UUID prefix.
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                let bare = identifier.strip_prefix($display_prefix).unwrap_or(identifier);
                !bare.is_empty()
                    && (self.0.to_string().starts_with(bare)
                        || self.0.simple().to_string().starts_with(bare))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(IncomeId, "inc-");
define_id!(ExpenseId, "exp-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        let id = ExpenseId::new();
        let short = id.short();
        assert!(short.starts_with("exp-"));
        assert_eq!(short.len(), 12);
    }

    #[test]
    fn test_matches_identifiers() {
        let id: IncomeId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();

        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("inc-550e8400"));
        assert!(id.matches("550e84"));
        assert!(!id.matches("inc-"));
        assert!(!id.matches("660e8400"));
    }

    #[test]
    fn test_display_is_full_uuid() {
        let id: ExpenseId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_id_serialization() {
        let id = IncomeId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: IncomeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
