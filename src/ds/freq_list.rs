//! Frequency-ordered bucket list for O(1) LFU tracking.
//!
//! The structure behind [`LfuCache`](crate::policy::lfu::LfuCache): entries
//! (key + value) live in per-frequency buckets, and the buckets form a doubly
//! linked list strictly ascending by frequency. Both entries and buckets are
//! allocated from [`SlotArena`]s and reference each other by [`SlotId`], so a
//! handle stays valid while its entry is relocated between buckets.
//!
//! ## Layout
//!
//! ```text
//!   head ──► [freq=1] ◄──► [freq=3] ◄──► [freq=4] ◄── tail
//!               │              │              │
//!               ▼              ▼              ▼
//!            e2 ─ e3          e4             e5
//!            │                                │
//!            oldest touch            most recent touch
//! ```
//!
//! Within a bucket the entry list runs oldest-touched (head) to
//! most-recently-touched (tail); every touch re-appends the entry at the tail
//! of its new bucket. The head entry of the head bucket is therefore always
//! the unique eviction candidate: lowest frequency, oldest touch among ties.
//!
//! Buckets are created lazily the first time an entry reaches their frequency
//! and destroyed the instant they empty, so the chain never contains an empty
//! bucket and never needs sorting: a promotion's target is either the
//! structural successor of the vacated position or a fresh bucket spliced in
//! at exactly that position.
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                     |
//! |------------------|------|-------------------------------------------|
//! | `insert_fresh`   | O(1) | New entry at the tail of the freq-1 bucket |
//! | `promote`        | O(1) | Move entry to the freq+1 bucket tail       |
//! | `promote_assign` | O(1) | Promotion plus value overwrite, one step   |
//! | `demote_to_one`  | O(1) | Move entry back to the freq-1 bucket tail  |
//! | `peek_lowest`    | O(1) | Head entry of the head bucket              |
//! | `pop_lowest`     | O(1) | Remove and return the eviction candidate   |
//! | `remove`         | O(1) | Remove an arbitrary entry by handle        |

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Stable handle to a live entry.
///
/// Remains valid across promotions and demotions; invalidated only when the
/// entry is removed, evicted, or the list is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) SlotId);

#[derive(Debug)]
struct EntryNode<K, V> {
    // Link fields first; they are touched on every promotion.
    prev: Option<SlotId>,
    next: Option<SlotId>,
    bucket: SlotId,
    key: K,
    value: V,
}

#[derive(Debug)]
struct BucketNode {
    freq: u64,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Frequency-bucketed entry store with O(1) promotion and eviction.
///
/// # Example
///
/// ```
/// use lfukit::ds::FreqList;
///
/// let mut list = FreqList::new();
/// let a = list.insert_fresh("a", 1);
/// let b = list.insert_fresh("b", 2);
///
/// list.promote(a); // "a" now at frequency 2
///
/// assert_eq!(list.frequency(a), Some(2));
/// assert_eq!(list.frequency(b), Some(1));
///
/// // "b" is the eviction candidate: lowest frequency.
/// let (key, value, freq) = list.pop_lowest().unwrap();
/// assert_eq!((key, value, freq), ("b", 2, 1));
/// ```
#[derive(Debug)]
pub struct FreqList<K, V> {
    entries: SlotArena<EntryNode<K, V>>,
    buckets: SlotArena<BucketNode>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K, V> FreqList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            buckets: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved entry capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the key for `id`, if the handle is live.
    pub fn key(&self, id: EntryId) -> Option<&K> {
        self.entries.get(id.0).map(|entry| &entry.key)
    }

    /// Returns the value for `id`, if the handle is live.
    pub fn value(&self, id: EntryId) -> Option<&V> {
        self.entries.get(id.0).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value for `id`.
    ///
    /// Does not touch the entry: frequency and recency are unchanged.
    pub fn value_mut(&mut self, id: EntryId) -> Option<&mut V> {
        self.entries.get_mut(id.0).map(|entry| &mut entry.value)
    }

    /// Returns the frequency of the bucket currently holding `id`.
    pub fn frequency(&self, id: EntryId) -> Option<u64> {
        let entry = self.entries.get(id.0)?;
        self.buckets.get(entry.bucket).map(|bucket| bucket.freq)
    }

    /// Returns the lowest frequency currently present.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.get(self.head?).map(|bucket| bucket.freq)
    }

    /// Inserts a new entry at frequency 1 and returns its handle.
    ///
    /// Ensures a freq-1 bucket exists at the head of the chain (creating it
    /// if absent) and appends the entry at its tail, making it the most
    /// recently touched entry at that frequency.
    pub fn insert_fresh(&mut self, key: K, value: V) -> EntryId {
        let target = match self.head {
            Some(h) if self.bucket(h).freq == 1 => h,
            other => self.new_bucket(1, None, other),
        };
        let id = self.entries.insert(EntryNode {
            prev: None,
            next: None,
            bucket: target,
            key,
            value,
        });
        self.push_back(target, id);
        EntryId(id)
    }

    /// Moves the entry to the bucket for frequency + 1 and returns the new
    /// frequency, or `None` if the handle is stale.
    ///
    /// The target bucket is the structural successor of the vacated position
    /// when its frequency already matches, otherwise a new bucket spliced in
    /// at that exact position. The vacated bucket is destroyed if it empties.
    /// The entry lands at the target's tail (most recently touched).
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::ds::FreqList;
    ///
    /// let mut list = FreqList::new();
    /// let id = list.insert_fresh(7u64, "v");
    /// assert_eq!(list.promote(id), Some(2));
    /// assert_eq!(list.promote(id), Some(3));
    /// assert_eq!(list.frequency(id), Some(3));
    /// ```
    pub fn promote(&mut self, id: EntryId) -> Option<u64> {
        if !self.entries.contains(id.0) {
            return None;
        }
        Some(self.relocate_up(id.0))
    }

    /// Promotes the entry and overwrites its value in the same relocation,
    /// returning the previous value. `None` if the handle is stale.
    pub fn promote_assign(&mut self, id: EntryId, value: V) -> Option<V> {
        let entry = self.entries.get_mut(id.0)?;
        let old = std::mem::replace(&mut entry.value, value);
        self.relocate_up(id.0);
        Some(old)
    }

    /// Moves the entry back to the freq-1 bucket tail and returns its old
    /// frequency, or `None` if the handle is stale.
    ///
    /// An entry already at frequency 1 is still re-appended at the tail, so
    /// demotion always refreshes recency.
    pub fn demote_to_one(&mut self, id: EntryId) -> Option<u64> {
        let entry = self.entries.get(id.0)?;
        let bucket_id = entry.bucket;
        let old_freq = self.bucket(bucket_id).freq;

        self.detach(id.0);
        if old_freq == 1 {
            self.push_back(bucket_id, id.0);
            return Some(old_freq);
        }
        if self.bucket(bucket_id).len == 0 {
            self.unlink_bucket(bucket_id);
        }
        let target = match self.head {
            Some(h) if self.bucket(h).freq == 1 => h,
            other => self.new_bucket(1, None, other),
        };
        self.push_back(target, id.0);
        Some(old_freq)
    }

    /// Returns the handle of the eviction candidate without removing it.
    pub fn lowest(&self) -> Option<EntryId> {
        self.buckets.get(self.head?)?.head.map(EntryId)
    }

    /// Peeks the eviction candidate `(key, value, freq)`: the front entry of
    /// the lowest-frequency bucket.
    pub fn peek_lowest(&self) -> Option<(&K, &V, u64)> {
        let bucket = self.buckets.get(self.head?)?;
        let entry = self.entries.get(bucket.head?)?;
        Some((&entry.key, &entry.value, bucket.freq))
    }

    /// Removes and returns the eviction candidate `(key, value, freq)`.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::ds::FreqList;
    ///
    /// let mut list = FreqList::new();
    /// list.insert_fresh("a", 1);
    /// list.insert_fresh("b", 2);
    /// let c = list.insert_fresh("c", 3);
    /// list.promote(c);
    ///
    /// // Untouched entries leave in insertion order, then the promoted one.
    /// assert_eq!(list.pop_lowest(), Some(("a", 1, 1)));
    /// assert_eq!(list.pop_lowest(), Some(("b", 2, 1)));
    /// assert_eq!(list.pop_lowest(), Some(("c", 3, 2)));
    /// assert_eq!(list.pop_lowest(), None);
    /// ```
    pub fn pop_lowest(&mut self) -> Option<(K, V, u64)> {
        let bucket_id = self.head?;
        let bucket = self.buckets.get(bucket_id)?;
        let freq = bucket.freq;
        let entry_id = bucket.head?;

        self.detach(entry_id);
        if self.bucket(bucket_id).len == 0 {
            self.unlink_bucket(bucket_id);
        }
        let node = self.entries.remove(entry_id).expect("entry missing");
        Some((node.key, node.value, freq))
    }

    /// Removes an arbitrary entry by handle, returning its key and value.
    pub fn remove(&mut self, id: EntryId) -> Option<(K, V)> {
        if !self.entries.contains(id.0) {
            return None;
        }
        let bucket_id = self.detach(id.0);
        if self.bucket(bucket_id).len == 0 {
            self.unlink_bucket(bucket_id);
        }
        let node = self.entries.remove(id.0).expect("entry missing");
        Some((node.key, node.value))
    }

    /// Removes all entries and buckets.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates entries in eviction order: buckets ascending by frequency,
    /// oldest touch first within each bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let entry = self
            .head
            .and_then(|b| self.buckets.get(b))
            .and_then(|b| b.head);
        Iter {
            list: self,
            bucket: self.head,
            entry,
        }
    }

    /// Walks the full structure and reports the first violated invariant.
    ///
    /// Checks: bucket chain strictly ascending by frequency with consistent
    /// links and no empty bucket; per-bucket entry chains consistent with
    /// head/tail/len and back-pointers; every entry accounted for.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut seen = 0usize;
        let mut prev_bucket: Option<SlotId> = None;
        let mut prev_freq: Option<u64> = None;
        let mut current = self.head;

        while let Some(bucket_id) = current {
            let bucket = self
                .buckets
                .get(bucket_id)
                .ok_or_else(|| InvariantError::new("bucket chain: stale bucket id"))?;
            if bucket.prev != prev_bucket {
                return Err(InvariantError::new(format!(
                    "bucket freq {}: prev link inconsistent",
                    bucket.freq
                )));
            }
            if bucket.freq == 0 {
                return Err(InvariantError::new("bucket with frequency 0"));
            }
            if let Some(prev_freq) = prev_freq {
                if bucket.freq <= prev_freq {
                    return Err(InvariantError::new(format!(
                        "bucket frequencies not strictly ascending: {} after {}",
                        bucket.freq, prev_freq
                    )));
                }
            }
            if bucket.len == 0 {
                return Err(InvariantError::new(format!(
                    "empty bucket at freq {} not destroyed",
                    bucket.freq
                )));
            }

            let mut count = 0usize;
            let mut prev_entry: Option<SlotId> = None;
            let mut cursor = bucket.head;
            while let Some(entry_id) = cursor {
                let entry = self
                    .entries
                    .get(entry_id)
                    .ok_or_else(|| InvariantError::new("entry chain: stale entry id"))?;
                if entry.bucket != bucket_id {
                    return Err(InvariantError::new(format!(
                        "entry in freq-{} bucket points at another bucket",
                        bucket.freq
                    )));
                }
                if entry.prev != prev_entry {
                    return Err(InvariantError::new(format!(
                        "entry chain in freq-{} bucket: prev link inconsistent",
                        bucket.freq
                    )));
                }
                prev_entry = Some(entry_id);
                cursor = entry.next;
                count += 1;
            }
            if bucket.tail != prev_entry {
                return Err(InvariantError::new(format!(
                    "freq-{} bucket tail does not match last entry",
                    bucket.freq
                )));
            }
            if count != bucket.len {
                return Err(InvariantError::new(format!(
                    "freq-{} bucket len {} but {} entries walked",
                    bucket.freq, bucket.len, count
                )));
            }
            seen += count;

            prev_bucket = Some(bucket_id);
            prev_freq = Some(bucket.freq);
            current = bucket.next;
        }

        if self.tail != prev_bucket {
            return Err(InvariantError::new("bucket chain tail mismatch"));
        }
        if seen != self.entries.len() {
            return Err(InvariantError::new(format!(
                "walked {} entries but arena holds {}",
                seen,
                self.entries.len()
            )));
        }
        Ok(())
    }

    fn bucket(&self, id: SlotId) -> &BucketNode {
        self.buckets.get(id).expect("bucket missing")
    }

    /// Core of promotion: relocate an entry to the freq+1 bucket tail.
    /// At `u64::MAX` the frequency saturates and only recency is refreshed.
    fn relocate_up(&mut self, id: SlotId) -> u64 {
        let bucket_id = self.entries.get(id).expect("entry missing").bucket;
        let old_freq = self.bucket(bucket_id).freq;
        if old_freq == u64::MAX {
            self.detach(id);
            self.push_back(bucket_id, id);
            return old_freq;
        }
        let new_freq = old_freq + 1;

        self.detach(id);
        let (b_prev, b_next, emptied) = {
            let bucket = self.bucket(bucket_id);
            (bucket.prev, bucket.next, bucket.len == 0)
        };
        let left = if emptied {
            self.unlink_bucket(bucket_id);
            b_prev
        } else {
            Some(bucket_id)
        };
        let target = match b_next {
            Some(n) if self.bucket(n).freq == new_freq => n,
            other => self.new_bucket(new_freq, left, other),
        };
        self.push_back(target, id);
        new_freq
    }

    fn new_bucket(&mut self, freq: u64, prev: Option<SlotId>, next: Option<SlotId>) -> SlotId {
        let id = self.buckets.insert(BucketNode {
            freq,
            head: None,
            tail: None,
            len: 0,
            prev,
            next,
        });
        match prev {
            Some(p) => self.buckets.get_mut(p).expect("bucket missing").next = Some(id),
            None => self.head = Some(id),
        }
        match next {
            Some(n) => self.buckets.get_mut(n).expect("bucket missing").prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    fn unlink_bucket(&mut self, id: SlotId) {
        let (prev, next) = {
            let bucket = self.bucket(id);
            (bucket.prev, bucket.next)
        };
        match prev {
            Some(p) => self.buckets.get_mut(p).expect("bucket missing").next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.buckets.get_mut(n).expect("bucket missing").prev = prev,
            None => self.tail = prev,
        }
        self.buckets.remove(id);
    }

    fn push_back(&mut self, bucket_id: SlotId, entry_id: SlotId) {
        let old_tail = self.bucket(bucket_id).tail;
        {
            let entry = self.entries.get_mut(entry_id).expect("entry missing");
            entry.prev = old_tail;
            entry.next = None;
            entry.bucket = bucket_id;
        }
        if let Some(t) = old_tail {
            self.entries.get_mut(t).expect("entry missing").next = Some(entry_id);
        }
        let bucket = self.buckets.get_mut(bucket_id).expect("bucket missing");
        if old_tail.is_none() {
            bucket.head = Some(entry_id);
        }
        bucket.tail = Some(entry_id);
        bucket.len += 1;
    }

    /// Unlinks the entry from its bucket's chain and returns the bucket id.
    /// Leaves the bucket in place even if it empties; callers decide.
    fn detach(&mut self, entry_id: SlotId) -> SlotId {
        let (prev, next, bucket_id) = {
            let entry = self.entries.get(entry_id).expect("entry missing");
            (entry.prev, entry.next, entry.bucket)
        };
        match prev {
            Some(p) => self.entries.get_mut(p).expect("entry missing").next = next,
            None => self.buckets.get_mut(bucket_id).expect("bucket missing").head = next,
        }
        match next {
            Some(n) => self.entries.get_mut(n).expect("entry missing").prev = prev,
            None => self.buckets.get_mut(bucket_id).expect("bucket missing").tail = prev,
        }
        {
            let entry = self.entries.get_mut(entry_id).expect("entry missing");
            entry.prev = None;
            entry.next = None;
        }
        let bucket = self.buckets.get_mut(bucket_id).expect("bucket missing");
        bucket.len -= 1;
        bucket_id
    }
}

impl<K, V> Default for FreqList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in eviction order. See [`FreqList::iter`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    list: &'a FreqList<K, V>,
    bucket: Option<SlotId>,
    entry: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (EntryId, &'a K, &'a V, u64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bucket_id = self.bucket?;
            if let Some(entry_id) = self.entry {
                let node = self.list.entries.get(entry_id)?;
                let freq = self.list.buckets.get(bucket_id)?.freq;
                self.entry = node.next;
                return Some((EntryId(entry_id), &node.key, &node.value, freq));
            }
            let next_bucket = self.list.buckets.get(bucket_id)?.next;
            self.bucket = next_bucket;
            self.entry = next_bucket
                .and_then(|b| self.list.buckets.get(b))
                .and_then(|b| b.head);
        }
    }
}
