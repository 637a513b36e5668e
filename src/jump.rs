//! Jump consistent hash, bit-compatible with Guava's `Hashing.consistentHash`.

/// Multiplier of the 64-bit linear congruential generator driving the jumps.
pub const LCG_MULTIPLIER: i64 = 2862933555777941757;

/// 2^31, the scale that turns the top 31 bits of the generator into `(0, 1]`.
const SCALE: f64 = 2147483648.0;

/// Map `state` to a bucket in `[0, buckets)`.
///
/// The result is stable across calls and across ports of the algorithm.
/// Growing `buckets` by one either keeps the result unchanged or moves it
/// to the new bucket `buckets`; no key ever moves between existing buckets.
///
/// `buckets <= 0` is outside the documented domain and yields `0`. Use
/// [`try_select_bucket`](crate::try_select_bucket) or
/// [`BucketCount`](crate::BucketCount) to reject such input instead.
#[inline]
pub fn select_bucket(mut state: i64, buckets: i32) -> i32 {
    let mut candidate = 0i32;
    loop {
        state = LCG_MULTIPLIER.wrapping_mul(state).wrapping_add(1);
        let r = next_double(state);
        // `as` truncates toward zero and saturates out-of-range values.
        let next = ((candidate + 1) as f64 / r) as i32;
        if next >= 0 && next < buckets {
            candidate = next;
        } else {
            return candidate;
        }
    }
}

/// Top 31 bits of the generator state as a double in `(0, 1)`.
///
/// The `+ 1` wraps in 32 bits like the reference, so an all-ones prefix
/// yields `-1.0` and ends the jump loop.
#[inline]
fn next_double(state: i64) -> f64 {
    let top = ((state as u64) >> 33) as i32;
    top.wrapping_add(1) as f64 / SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bucket_is_always_zero() {
        for s in [0, 1, 2, 3, 34, -19, -199_999_999, 1_000_000, i64::MIN, i64::MAX] {
            assert_eq!(select_bucket(s, 1), 0, "state {s}");
        }
    }

    #[test]
    fn guava_golden_values() {
        let golden100 = [
            0, 55, 62, 8, 45, 59, 86, 97, 82, 59, 73, 37, 17, 56, 86, 21, 90, 37, 38, 83,
        ];
        for (i, &want) in golden100.iter().enumerate() {
            assert_eq!(select_bucket(i as i64, 100), want, "state {i}");
        }
        assert_eq!(select_bucket(10863919174838991, 11), 6);
        assert_eq!(select_bucket(2016238256797177309, 11), 3);
        assert_eq!(select_bucket(1673758223894951030, 11), 5);
        assert_eq!(select_bucket(2, 100001), 80343);
        assert_eq!(select_bucket(2201, 100001), 22152);
        assert_eq!(select_bucket(2202, 100001), 15018);
    }

    #[test]
    fn non_positive_buckets_yield_zero() {
        for s in [1, 2, -19, 0, i64::MAX] {
            assert_eq!(select_bucket(s, -1), 0);
            assert_eq!(select_bucket(s, 0), 0);
            assert_eq!(select_bucket(s, i32::MIN), 0);
        }
    }

    #[test]
    fn next_double_bounds() {
        // Smallest prefix: 1 / 2^31.
        assert_eq!(next_double(0), 1.0 / SCALE);
        // Largest non-wrapping prefix.
        let top = ((1u64 << 31) - 2) << 33;
        assert_eq!(next_double(top as i64), ((1u64 << 31) - 1) as f64 / SCALE);
        // All-ones prefix wraps to i32::MIN.
        assert_eq!(next_double(-1), -1.0);
    }

    #[test]
    fn max_bucket_count_stays_in_range() {
        for s in [0, 1, 123_456_789, 1 << 62, i64::MIN, i64::MAX] {
            let b = select_bucket(s, i32::MAX);
            assert!((0..i32::MAX).contains(&b), "state {s} -> {b}");
        }
        assert_eq!(select_bucket(1 << 62, i32::MAX), 2103616256);
        assert_eq!(select_bucket(123456789, i32::MAX), 1234790967);
    }
}
