use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};
use uuid::Uuid;

/// Declares an opaque string identifier.
///
/// Identifiers read back from storage are accepted as-is; freshly created
/// entities get a random UUID v4.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a tracked habit
    HabitId
);
entity_id!(
    /// Identifier of a single habit log entry
    LogEntryId
);
entity_id!(
    /// Identifier of a kanban board
    BoardId
);
entity_id!(
    /// Identifier of a kanban card
    CardId
);
entity_id!(
    /// Identifier of a planner task
    TaskId
);
entity_id!(SubTaskId);
entity_id!(CourseId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = CardId::generate();
        let b = CardId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = HabitId::from("habit-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"habit-1\"");

        let parsed: HabitId = serde_json::from_str("\"habit-1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
