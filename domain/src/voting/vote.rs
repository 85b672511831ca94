//! Vote primitives for one discussion snapshot.
//!
//! A [`Vote`] is a single (participant, statement, value) record read from
//! external storage. The snapshot invariant of at most one vote per
//! (participant, statement) pair is enforced upstream; the engine only
//! consumes it.

use crate::core::ids::{ParticipantId, StatementId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a participant voted on a statement.
///
/// Serializes with the numeric wire encoding used by vote snapshots:
/// agree = 1, disagree = -1, pass = 0.
///
/// # Example
///
/// ```
/// use insight_domain::VoteValue;
///
/// assert_eq!(VoteValue::Agree.as_f64(), 1.0);
/// assert_eq!(VoteValue::from_i8(-1), Some(VoteValue::Disagree));
/// assert_eq!(VoteValue::from_i8(2), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum VoteValue {
    Agree,
    Disagree,
    /// Unsure: a cast vote that counts toward totals but toward neither side.
    #[default]
    Pass,
}

impl VoteValue {
    /// Matrix cell value: agree = 1.0, disagree = -1.0, pass = 0.0.
    pub fn as_f64(self) -> f64 {
        match self {
            VoteValue::Agree => 1.0,
            VoteValue::Disagree => -1.0,
            VoteValue::Pass => 0.0,
        }
    }

    /// Numeric wire encoding.
    pub fn as_i8(self) -> i8 {
        match self {
            VoteValue::Agree => 1,
            VoteValue::Disagree => -1,
            VoteValue::Pass => 0,
        }
    }

    /// Parse the numeric wire encoding; anything outside {-1, 0, 1} is rejected.
    pub fn from_i8(raw: i8) -> Option<Self> {
        match raw {
            1 => Some(VoteValue::Agree),
            -1 => Some(VoteValue::Disagree),
            0 => Some(VoteValue::Pass),
            _ => None,
        }
    }

    /// Whether this vote takes a side (agree or disagree).
    ///
    /// Only substantive votes enter agreement-rate denominators.
    pub fn is_substantive(self) -> bool {
        !matches!(self, VoteValue::Pass)
    }
}

impl From<VoteValue> for i8 {
    fn from(value: VoteValue) -> i8 {
        value.as_i8()
    }
}

impl TryFrom<i8> for VoteValue {
    type Error = String;

    fn try_from(raw: i8) -> Result<Self, Self::Error> {
        VoteValue::from_i8(raw).ok_or_else(|| format!("invalid vote value: {raw}"))
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteValue::Agree => "agree",
            VoteValue::Disagree => "disagree",
            VoteValue::Pass => "pass",
        };
        write!(f, "{s}")
    }
}

/// A single recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Who voted.
    pub participant: ParticipantId,
    /// Which statement was voted on.
    pub statement: StatementId,
    /// The cast value.
    pub value: VoteValue,
}

impl Vote {
    /// Create a new vote.
    pub fn new(
        participant: impl Into<ParticipantId>,
        statement: impl Into<StatementId>,
        value: VoteValue,
    ) -> Self {
        Self {
            participant: participant.into(),
            statement: statement.into(),
            value,
        }
    }

    /// Create an agree vote.
    pub fn agree(participant: impl Into<ParticipantId>, statement: impl Into<StatementId>) -> Self {
        Self::new(participant, statement, VoteValue::Agree)
    }

    /// Create a disagree vote.
    pub fn disagree(
        participant: impl Into<ParticipantId>,
        statement: impl Into<StatementId>,
    ) -> Self {
        Self::new(participant, statement, VoteValue::Disagree)
    }

    /// Create a pass (unsure) vote.
    pub fn pass(participant: impl Into<ParticipantId>, statement: impl Into<StatementId>) -> Self {
        Self::new(participant, statement, VoteValue::Pass)
    }
}
