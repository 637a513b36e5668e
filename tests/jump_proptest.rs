use guavahash::{select_bucket, would_move, BucketCount};
use proptest::prelude::*;

// Range, determinism and the jump property over arbitrary 64-bit states.
proptest! {
    #[test]
    fn prop_result_in_range(state in any::<i64>(), buckets in 1i32..=i32::MAX) {
        let b = select_bucket(state, buckets);
        prop_assert!(b >= 0 && b < buckets);
        prop_assert_eq!(b, select_bucket(state, buckets));
    }

    #[test]
    fn prop_single_bucket_collapses(state in any::<i64>()) {
        prop_assert_eq!(select_bucket(state, 1), 0);
    }

    #[test]
    fn prop_grow_by_one_keeps_or_jumps_to_new(state in any::<i64>(), buckets in 1i32..100_000) {
        let before = select_bucket(state, buckets);
        let after = select_bucket(state, buckets + 1);
        prop_assert!(after == before || after == buckets,
            "state {}: {} -> {} growing {} -> {}", state, before, after, buckets, buckets + 1);
    }

    #[test]
    fn prop_grow_many_moves_only_into_new(state in any::<i64>(), from in 1i32..10_000, extra in 1i32..10_000) {
        let to = from + extra;
        let a = BucketCount::new(from).unwrap();
        let b = BucketCount::new(to).unwrap();
        if would_move(state, a, b) {
            let nb = b.select(state);
            prop_assert!(nb >= from && nb < to);
        } else {
            prop_assert_eq!(a.select(state), b.select(state));
        }
    }
}
