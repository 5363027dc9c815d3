use thiserror::Error;

/// Errors produced by point, cluster and engine operations.
///
/// All of them indicate a malformed call on the caller's side; none is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// Malformed call parameters (e.g. `k == 0`, `k` exceeding the point count, empty dataset).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Points / centroids of differing dimension were combined.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Indexed coordinate access outside of `[0, dimension)`.
    #[error("coordinate index {index} is out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },
}

pub type Result<T> = std::result::Result<T, ClusterError>;

impl ClusterError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ClusterError::InvalidArgument(msg.into())
    }
}
