//! # LFU Cache Implementation
//!
//! Least Frequently Used cache with O(1) insert, get, and eviction, breaking
//! frequency ties toward the least recently accessed entry.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────┐
//!   │                     LfuCache<K, V>                        │
//!   │                                                           │
//!   │   index: FxHashMap<K, EntryId>     capacity: usize        │
//!   │              │                                            │
//!   │              ▼ (stable handle)                            │
//!   │   list: FreqList<K, V>                                    │
//!   │                                                           │
//!   │     head ──► [freq=1] ◄──► [freq=2] ◄──► [freq=5]         │
//!   │                 │             │             │             │
//!   │              e7 ─ e2         e4            e1             │
//!   │              ▲                                            │
//!   │              └── eviction candidate                       │
//!   └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The hash index maps keys to [`EntryId`] handles into the frequency list;
//! handles survive promotions, so the index is only written on insert and
//! removal. All frequency and recency bookkeeping lives in the list.
//!
//! ## Eviction Policy
//!
//! - Every `insert` of a new key starts it at frequency 1.
//! - Every `get` and every overwrite of an existing key adds 1.
//! - At capacity, the entry with the lowest frequency is evicted; among
//!   entries tied at that frequency, the least recently accessed one goes.
//!
//! ```text
//!   capacity = 2
//!   insert(1), insert(2), get(1)      →  {2: freq 1, 1: freq 2}
//!   insert(3)                         →  evicts 2 (lowest freq)
//!   get(3), insert(4)                 →  3 and 1 tied at freq 2;
//!                                        1 was touched longer ago → evicted
//! ```
//!
//! ## Characteristics
//!
//! | Aspect            | Value                                       |
//! |-------------------|---------------------------------------------|
//! | Insert            | O(1) amortized                              |
//! | Get               | O(1) amortized                              |
//! | Evict             | O(1)                                        |
//! | Memory            | One entry node + hash slot per key          |
//! | Capacity 0        | Valid; inserts are no-ops, gets always miss |
//! | Thread safety     | None; wrap externally if shared             |
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.get(&1);
//!
//! cache.insert(3, "three"); // evicts 2, the least frequently used
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.get(&3), Some(&"three"));
//! ```

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::{EntryId, FreqList};
use crate::error::InvariantError;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// An LFU cache with least-recently-used tie-breaking.
///
/// See the [module documentation](self) for the eviction policy and
/// complexity characteristics.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    list: FreqList<K, V>,
    index: FxHashMap<K, EntryId>,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 produces a cache that stores nothing: inserts are
    /// discarded and every lookup misses.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: FreqList::with_capacity(capacity),
            index: FxHashMap::default(),
            capacity,
        }
    }

    /// Returns the value for `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.value(id)
    }

    /// Returns the lowest frequency currently present, `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        self.list.min_freq()
    }

    /// Iterates entries in eviction order as `(&key, &value, frequency)`:
    /// ascending frequency, least recently accessed first within a tie.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V, u64)> {
        self.list.iter().map(|(_, k, v, f)| (k, v, f))
    }

    /// Verifies internal consistency, returning the first violation found.
    ///
    /// Checks the index-to-list bijection, the capacity bound, and the full
    /// set of frequency-list structural invariants. Intended for tests and
    /// debugging; cost is O(len).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }
        for (id, key, _, _) in self.list.iter() {
            match self.index.get(key) {
                Some(&indexed) if indexed == id => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index maps a key to a different entry than the list",
                    ));
                }
                None => {
                    return Err(InvariantError::new("list entry missing from index"));
                }
            }
        }
        self.list.check_invariants()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts or overwrites. An overwrite counts as an access: the entry's
    /// frequency rises by 1 and its recency is refreshed, in the same step
    /// as the value swap. A new key at capacity evicts the LFU entry first.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            return self.list.promote_assign(id, value);
        }
        if self.capacity == 0 {
            return None;
        }
        if self.list.len() == self.capacity {
            if let Some((evicted, _, _)) = self.list.pop_lowest() {
                self.index.remove(&evicted);
            }
        }
        let id = self.list.insert_fresh(key.clone(), value);
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.promote(id);
        self.list.value(id)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|(_, value)| value)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let (key, value, _) = self.list.pop_lowest()?;
        self.index.remove(&key);
        Some((key, value))
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.list.peek_lowest().map(|(k, v, _)| (k, v))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.list.frequency(id)
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.list.demote_to_one(id)
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.list.promote(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_behavior {
        use super::*;

        #[test]
        fn insert_and_get() {
            let mut cache = LfuCache::new(4);
            assert_eq!(cache.insert(1, "one"), None);
            assert_eq!(cache.insert(2, "two"), None);

            assert_eq!(cache.get(&1), Some(&"one"));
            assert_eq!(cache.get(&2), Some(&"two"));
            assert_eq!(cache.get(&3), None);
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn insert_new_key_starts_at_frequency_one() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            assert_eq!(cache.frequency(&1), Some(1));
        }

        #[test]
        fn get_increments_frequency() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.get(&1);
            cache.get(&1);
            assert_eq!(cache.frequency(&1), Some(3));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn overwrite_counts_as_access() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            assert_eq!(cache.insert(1, "uno"), Some("one"));

            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(cache.peek(&1), Some(&"uno"));
            assert_eq!(cache.len(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn eviction_removes_least_frequent() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, "one");
            cache.insert(2, "two");
            cache.get(&1);

            cache.insert(3, "three");
            assert!(!cache.contains(&2));
            assert!(cache.contains(&1));
            assert!(cache.contains(&3));
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn frequency_tie_evicts_least_recently_accessed() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, "one");
            cache.insert(2, "two");
            cache.get(&1);
            cache.insert(3, "three"); // evicts 2
            cache.get(&3); // 1 and 3 both at freq 2; 3 accessed later

            cache.insert(4, "four"); // tie broken against 1
            assert!(!cache.contains(&1));
            assert_eq!(cache.get(&3), Some(&"three"));
            assert_eq!(cache.get(&4), Some(&"four"));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn full_workout_at_capacity_two() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, 1);
            cache.insert(2, 2);
            assert_eq!(cache.get(&1), Some(&1));
            cache.insert(3, 3); // evicts 2
            assert_eq!(cache.get(&2), None);
            assert_eq!(cache.get(&3), Some(&3));
            cache.insert(4, 4); // evicts 1 (tie at freq 2, 1 older)
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.get(&3), Some(&3));
            assert_eq!(cache.get(&4), Some(&4));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn pop_lfu_in_order() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");
            cache.get(&1);
            cache.get(&1);
            cache.get(&3);

            assert_eq!(cache.pop_lfu(), Some((2, "b")));
            assert_eq!(cache.pop_lfu(), Some((3, "c")));
            assert_eq!(cache.pop_lfu(), Some((1, "a")));
            assert_eq!(cache.pop_lfu(), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn peek_lfu_does_not_touch() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.insert(2, "two");
            cache.get(&2);

            assert_eq!(cache.peek_lfu(), Some((&1, &"one")));
            assert_eq!(cache.peek_lfu(), Some((&1, &"one")));
            assert_eq!(cache.frequency(&1), Some(1));
        }

        #[test]
        fn peek_does_not_count_as_access() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            assert_eq!(cache.peek(&1), Some(&"one"));
            assert_eq!(cache.peek(&1), Some(&"one"));
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.peek(&9), None);
        }

        #[test]
        fn remove_frees_a_slot() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, "one");
            cache.insert(2, "two");

            assert_eq!(cache.remove(&1), Some("one"));
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.len(), 1);

            cache.insert(3, "three");
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn reset_frequency_demotes_to_one() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.get(&1);
            cache.get(&1);

            assert_eq!(cache.reset_frequency(&1), Some(3));
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.reset_frequency(&9), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn increment_frequency_without_value_access() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            assert_eq!(cache.increment_frequency(&1), Some(2));
            assert_eq!(cache.increment_frequency(&1), Some(3));
            assert_eq!(cache.increment_frequency(&9), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn iter_walks_eviction_order() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");
            cache.get(&2);
            cache.get(&2);
            cache.get(&3);

            let order: Vec<_> = cache.iter().map(|(k, _, f)| (*k, f)).collect();
            assert_eq!(order, vec![(1, 1), (3, 2), (2, 3)]);
        }

        #[test]
        fn clear_empties_the_cache() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.insert(2, "two");
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 4);
            assert_eq!(cache.get(&1), None);
            cache.check_invariants().unwrap();

            // Reusable after clear.
            cache.insert(3, "three");
            assert_eq!(cache.get(&3), Some(&"three"));
            cache.check_invariants().unwrap();
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn zero_capacity_rejects_everything() {
            let mut cache = LfuCache::new(0);
            assert_eq!(cache.insert(1, "one"), None);
            assert_eq!(cache.get(&1), None);
            assert!(!cache.contains(&1));
            assert!(cache.is_empty());
            assert_eq!(cache.pop_lfu(), None);
            assert_eq!(cache.peek_lfu(), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn capacity_one_churns_correctly() {
            let mut cache = LfuCache::new(1);
            cache.insert(1, "one");
            cache.insert(2, "two");
            assert!(!cache.contains(&1));
            assert_eq!(cache.get(&2), Some(&"two"));

            cache.insert(3, "three"); // evicts 2 despite its frequency
            assert!(!cache.contains(&2));
            assert_eq!(cache.get(&3), Some(&"three"));
            assert_eq!(cache.len(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn overwrite_at_capacity_does_not_evict() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, "one");
            cache.insert(2, "two");

            assert_eq!(cache.insert(1, "uno"), Some("one"));
            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn hot_key_survives_heavy_churn() {
            let mut cache = LfuCache::new(3);
            cache.insert(0u64, "hot");
            for _ in 0..10 {
                cache.get(&0);
            }
            for k in 1..100u64 {
                cache.insert(k, "cold");
            }
            assert_eq!(cache.peek(&0), Some(&"hot"));
            assert_eq!(cache.len(), 3);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn evicted_key_restarts_at_frequency_one() {
            let mut cache = LfuCache::new(2);
            cache.insert(1, "one");
            cache.get(&1);
            cache.get(&1); // freq 3
            cache.insert(2, "two");
            cache.insert(3, "three"); // evicts 2

            cache.insert(2, "two again"); // evicts 3, and 2 is new again
            assert_eq!(cache.frequency(&2), Some(1));
            assert!(!cache.contains(&3));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn remove_then_reinsert_same_key() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.get(&1);
            cache.remove(&1);

            cache.insert(1, "again");
            assert_eq!(cache.frequency(&1), Some(1));
            assert_eq!(cache.peek(&1), Some(&"again"));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn remove_batch_reports_per_key() {
            let mut cache = LfuCache::new(4);
            cache.insert(1, "one");
            cache.insert(2, "two");

            let removed = cache.remove_batch(&[1, 9, 2]);
            assert_eq!(removed, vec![Some("one"), None, Some("two")]);
            assert!(cache.is_empty());
            cache.check_invariants().unwrap();
        }

        #[test]
        fn min_frequency_tracks_head_bucket() {
            let mut cache = LfuCache::new(4);
            assert_eq!(cache.min_frequency(), None);

            cache.insert(1, "one");
            cache.insert(2, "two");
            assert_eq!(cache.min_frequency(), Some(1));

            cache.get(&1);
            cache.get(&2);
            assert_eq!(cache.min_frequency(), Some(2));
        }

        #[test]
        fn string_keys_work() {
            let mut cache = LfuCache::new(2);
            cache.insert("alpha".to_string(), 1);
            cache.insert("beta".to_string(), 2);
            cache.get(&"beta".to_string());

            cache.insert("gamma".to_string(), 3);
            assert!(!cache.contains(&"alpha".to_string()));
            assert_eq!(cache.get(&"beta".to_string()), Some(&2));
            cache.check_invariants().unwrap();
        }
    }
}
