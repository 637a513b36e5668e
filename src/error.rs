use thiserror::Error;

/// Rejected bucket counts for the checked selection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The bucket count is zero or negative.
    #[error("invalid bucket count {buckets}: must be at least 1")]
    InvalidBuckets { buckets: i64 },
    /// The bucket count does not fit in a 32-bit signed integer.
    #[error("bucket count {buckets} out of range: must be at most {}", i32::MAX)]
    BucketsOutOfRange { buckets: i128 },
}

/// Failure to register a key in a [`Placement`](crate::Placement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("key is already placed")]
    DuplicateKey,
}
