//! Placement: a registry of keys with their current bucket under a
//! resizable bucket count.
//!
//! Keys live in a generational `SlotMap` and are addressed by stable
//! `Handle`s; a `HashTable` indexes them by state for duplicate detection
//! and lookup. Each entry stores its precomputed index hash, so the table
//! never rehashes a key after insertion.

use crate::bucket::BucketCount;
use crate::error::InsertError;
use core::hash::BuildHasher;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;
use tracing::{debug, trace};

/// Stable reference to a placed key. Stale after `remove`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

/// A key that changed bucket during [`Placement::resize`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Relocation {
    pub handle: Handle,
    pub state: i64,
    pub from: i32,
    pub to: i32,
}

#[derive(Debug)]
struct Entry {
    state: i64,
    bucket: i32,
    hash: u64,
}

pub struct Placement<S = RandomState> {
    hasher: S,
    buckets: BucketCount,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry>,
}

impl Placement {
    pub fn new(buckets: BucketCount) -> Self {
        Self::with_hasher(buckets, Default::default())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(BucketCount::ONE)
    }
}

/// Iterator over `(handle, state, bucket)` for every placed key.
pub struct Iter<'a> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Handle, i64, i32);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(k, e)| (Handle::new(k), e.state, e.bucket))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<S> Placement<S>
where
    S: BuildHasher,
{
    pub fn with_hasher(buckets: BucketCount, hasher: S) -> Self {
        Self {
            hasher,
            buckets,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
        }
    }

    fn make_hash(&self, state: i64) -> u64 {
        self.hasher.hash_one(state)
    }

    pub fn buckets(&self) -> BucketCount {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn find(&self, state: i64) -> Option<Handle> {
        let hash = self.make_hash(state);
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|e| e.state == state)
                    .unwrap_or(false)
            })
            .map(|&k| Handle::new(k))
    }

    pub fn contains_key(&self, state: i64) -> bool {
        self.find(state).is_some()
    }

    /// Place `state` under the current bucket count.
    pub fn insert(&mut self, state: i64) -> Result<Handle, InsertError> {
        let hash = self.make_hash(state);
        match self.index.entry(
            hash,
            |&kk| self.slots.get(kk).map(|e| e.state == state).unwrap_or(false),
            |&kk| self.slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            hashbrown::hash_table::Entry::Occupied(_) => {
                trace!(state, "duplicate placement rejected");
                Err(InsertError::DuplicateKey)
            }
            hashbrown::hash_table::Entry::Vacant(v) => {
                let bucket = self.buckets.select(state);
                let k = self.slots.insert(Entry {
                    state,
                    bucket,
                    hash,
                });
                let _ = v.insert(k);
                Ok(Handle::new(k))
            }
        }
    }

    /// Remove a key, returning its `(state, bucket)`.
    pub fn remove(&mut self, handle: Handle) -> Option<(i64, i32)> {
        let k = handle.raw_handle();
        let entry = self.slots.remove(k)?;

        // Every live slot has exactly one index entry.
        if let Ok(occupied) = self.index.find_entry(entry.hash, |&kk| kk == k) {
            occupied.remove();
        }

        Some((entry.state, entry.bucket))
    }

    pub fn state(&self, handle: Handle) -> Option<i64> {
        self.slots.get(handle.raw_handle()).map(|e| e.state)
    }

    pub fn bucket(&self, handle: Handle) -> Option<i32> {
        self.slots.get(handle.raw_handle()).map(|e| e.bucket)
    }

    /// Move to `buckets` and return every key whose bucket changed.
    ///
    /// Growing only relocates keys into the added buckets; shrinking only
    /// relocates keys out of the removed ones.
    pub fn resize(&mut self, buckets: BucketCount) -> Vec<Relocation> {
        let old = self.buckets;
        if old == buckets {
            return Vec::new();
        }
        self.buckets = buckets;

        let mut moved = Vec::new();
        for (k, e) in self.slots.iter_mut() {
            let to = buckets.select(e.state);
            if to != e.bucket {
                moved.push(Relocation {
                    handle: Handle::new(k),
                    state: e.state,
                    from: e.bucket,
                    to,
                });
                e.bucket = to;
            }
        }

        debug!(
            from = old.get(),
            to = buckets.get(),
            keys = self.slots.len(),
            moved = moved.len(),
            "placement resized"
        );
        moved
    }

    /// Number of keys in each bucket, indexed by bucket.
    pub fn load(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.buckets.get() as usize];
        for e in self.slots.values() {
            counts[e.bucket as usize] += 1;
        }
        counts
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }
}
