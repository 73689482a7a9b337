use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snafu::ensure;
use uuid::Uuid;

use super::error::{InvalidIdSnafu, StorageError, StorageResult};

// Macro keeps all ID wrappers structurally identical, so the seed format stays predictable.
macro_rules! define_text_id {
    ($name:ident, $id_type:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps raw identifier text without validation.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn parse(raw: &str) -> StorageResult<Self> {
                ensure!(
                    !raw.trim().is_empty(),
                    InvalidIdSnafu {
                        stage: "parse-text-id",
                        id_type: $id_type,
                        raw: raw.to_string(),
                    }
                );
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = StorageError;

            fn try_from(raw: String) -> StorageResult<Self> {
                Self::parse(&raw)
            }
        }

        impl FromStr for $name {
            type Err = StorageError;

            fn from_str(raw: &str) -> StorageResult<Self> {
                Self::parse(raw)
            }
        }
    };
}

define_text_id!(ContactId, "contact-id");
define_text_id!(MessageId, "message-id");

impl MessageId {
    /// Mints a fresh identifier for a locally composed message.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(ContactId::parse("").is_err());
        assert!(MessageId::parse("   ").is_err());
        assert_eq!(ContactId::parse("1").map(|id| id.to_string()).ok(), Some("1".to_string()));
    }

    #[test]
    fn generated_message_ids_do_not_collide() {
        let ids = (0..512).map(|_| MessageId::generate()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 512);
    }

    #[test]
    fn ids_deserialize_through_validation() {
        let parsed: Result<ContactId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: ContactId = serde_json::from_str("\"42\"").unwrap_or_else(|_| "x".into());
        assert_eq!(parsed.as_str(), "42");
    }
}
