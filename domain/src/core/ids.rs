//! Identifier value objects for participants, statements and discussions.
//!
//! All three are thin wrappers around the numeric ids assigned by whatever
//! storage feeds the engine. They serialize transparently, so a
//! `BTreeMap<ParticipantId, _>` comes out of serde_json with stringified
//! numeric keys, exactly the shape the output contract requires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a voting participant.
///
/// # Example
///
/// ```
/// use insight_domain::ParticipantId;
///
/// let id = ParticipantId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ParticipantId(i64);

/// Identifier of a position statement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StatementId(i64);

/// Identifier of a discussion; one clustering run covers exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct DiscussionId(i64);

macro_rules! id_impls {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw numeric id.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw numeric id.
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_impls!(ParticipantId);
id_impls!(StatementId);
id_impls!(DiscussionId);
