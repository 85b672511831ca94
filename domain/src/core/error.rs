//! Domain error types

use thiserror::Error;

/// Errors raised while partitioning participants into opinion groups.
///
/// Data shortage ("not ready") is deliberately *not* an error; it is a
/// structured verdict returned by the readiness check. These variants cover
/// the genuinely exceptional cases a caller must see.
#[derive(Error, Debug)]
pub enum GroupingError {
    /// Fewer than four participants cannot form two groups of two.
    #[error("cannot cluster {0} participants (minimum 4)")]
    TooFewParticipants(usize),

    /// A fixed group count outside the supported range was requested.
    #[error("invalid group count {requested} for {participants} participants")]
    InvalidGroupCount {
        requested: usize,
        participants: usize,
    },

    /// The clustering method could not produce a valid multi-group partition.
    #[error("clustering failed: {0}")]
    ClusteringFailed(String),
}

impl GroupingError {
    /// True when the underlying algorithm failed on the data, as opposed to
    /// the input being too small or the configuration being out of range.
    pub fn is_degenerate_data(&self) -> bool {
        matches!(self, GroupingError::ClusteringFailed(_))
    }
}
