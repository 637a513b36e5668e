//! Validated bucket counts and the checked selection entry points.

use crate::error::SelectError;
use crate::jump::select_bucket;
use core::fmt;

/// A bucket count known to be at least 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BucketCount(i32);

impl BucketCount {
    /// A single bucket; every key maps to 0.
    pub const ONE: BucketCount = BucketCount(1);

    pub const fn new(buckets: i32) -> Result<Self, SelectError> {
        if buckets < 1 {
            return Err(SelectError::InvalidBuckets {
                buckets: buckets as i64,
            });
        }
        Ok(BucketCount(buckets))
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Bucket for `state` under this count. Always in `[0, self.get())`.
    #[inline]
    pub fn select(self, state: i64) -> i32 {
        select_bucket(state, self.0)
    }
}

impl TryFrom<i32> for BucketCount {
    type Error = SelectError;

    fn try_from(buckets: i32) -> Result<Self, Self::Error> {
        BucketCount::new(buckets)
    }
}

impl TryFrom<i64> for BucketCount {
    type Error = SelectError;

    fn try_from(buckets: i64) -> Result<Self, Self::Error> {
        if buckets < 1 {
            return Err(SelectError::InvalidBuckets { buckets });
        }
        let b = i32::try_from(buckets).map_err(|_| SelectError::BucketsOutOfRange {
            buckets: buckets as i128,
        })?;
        BucketCount::new(b)
    }
}

impl TryFrom<u32> for BucketCount {
    type Error = SelectError;

    fn try_from(buckets: u32) -> Result<Self, Self::Error> {
        BucketCount::try_from(buckets as i64)
    }
}

impl From<BucketCount> for i32 {
    fn from(b: BucketCount) -> i32 {
        b.0
    }
}

impl fmt::Display for BucketCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Like [`select_bucket`], but rejects `buckets <= 0`.
pub fn try_select_bucket(state: i64, buckets: i32) -> Result<i32, SelectError> {
    Ok(BucketCount::new(buckets)?.select(state))
}

/// Whether `state` lands in a different bucket under `to` than under `from`.
///
/// When `to > from`, a key that moves always moves into `[from, to)`.
pub fn would_move(state: i64, from: BucketCount, to: BucketCount) -> bool {
    from != to && from.select(state) != to.select(state)
}
