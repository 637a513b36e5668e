//! guavahash: Guava-compatible jump consistent hashing.
//!
//! Maps a pre-hashed 64-bit key to one of `N` buckets such that growing
//! `N` by one moves only the keys that now belong to the new bucket.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one pure, allocation-free selection function that produces the
//!   same output as Guava's `Hashing.consistentHash` for every input, with
//!   thin checked and stateful layers on top.
//! - Layers:
//!   - `select_bucket(state, buckets)`: the raw jump loop. Total over all
//!     inputs; `buckets <= 0` yields 0.
//!   - `BucketCount` / `try_select_bucket`: validated bucket counts; reject
//!     `buckets <= 0` with `SelectError`.
//!   - `Placement<S>`: registry of keys with stable handles that caches each
//!     key's bucket and reports relocations on resize.
//!
//! Constraints
//! - Bit-exact parity with the reference: the LCG step wraps in 64 bits,
//!   the top-bit extraction is a logical shift of the unsigned view, and
//!   the `+ 1` on the 31-bit prefix wraps in 32 bits.
//! - Float-to-int narrowing truncates toward zero (`as` saturates where
//!   the reference would be undefined; such values are never `< buckets`).
//! - No iteration cap; expected iterations grow with `ln(buckets)`.
//!
//! Hashing arbitrary values into the 64-bit key is left to the caller.

mod bucket;
pub mod cli;
mod error;
pub mod jump;
pub mod placement;
mod placement_proptest;

// Public surface
pub use bucket::{try_select_bucket, would_move, BucketCount};
pub use cli::Cli;
pub use error::{InsertError, SelectError};
pub use jump::select_bucket;
pub use placement::{Handle, Placement, Relocation};
