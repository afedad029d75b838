//! # Cache Trait Hierarchy
//!
//! Defines the trait surface implemented by [`LfuCache`](crate::policy::lfu::LfuCache):
//! universal cache operations, arbitrary key removal, and frequency-aware
//! eviction control.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LfuCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lfu() → Option<(K, V)>             │
//!   │  peek_lfu() → Option<(&K, &V)>          │
//!   │  frequency(&K) → Option<u64>            │
//!   │  reset_frequency(&K) → Option<u64>      │
//!   │  increment_frequency(&K) → Option<u64>  │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait           | Extends        | Purpose                              |
//! |-----------------|----------------|--------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations           |
//! | `MutableCache`  | `CoreCache`    | Adds arbitrary key removal           |
//! | `LfuCacheTrait` | `MutableCache` | Frequency tracking and LFU eviction  |
//!
//! ## Implementation Notes
//!
//! - **Trait Bounds**: `CoreCache` has no bounds on K, V; implementations add as needed
//! - **Default Implementations**: `is_empty()`, `remove_batch()`
//! - **Access Counting**: `insert` and `get` both count as accesses; `contains`,
//!   `peek_lfu`, and `frequency` never do

/// Core cache operations that all caches support.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use lfukit::traits::CoreCache;
/// use lfukit::policy::lfu::LfuCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy before the new entry is inserted. Overwriting
    /// an existing key counts as an access to it.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    ///
    /// // New key returns None
    /// assert_eq!(cache.insert(1, "first"), None);
    ///
    /// // Existing key returns previous value
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal state (access time, frequency) depending on the
    /// eviction policy. Use [`contains`](Self::contains) if you only need
    /// to check existence without affecting eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    ///
    /// Unlike [`get`](Self::get), this does not affect eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&99));
    /// ```
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// assert_eq!(cache.len(), 0);
    ///
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// assert_eq!(cache.len(), 2);
    /// ```
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache: LfuCache<u64, &str> = LfuCache::new(10);
    /// assert!(cache.is_empty());
    ///
    /// cache.insert(1, "value");
    /// assert!(!cache.is_empty());
    /// ```
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let cache: LfuCache<u64, &str> = LfuCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::CoreCache;
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// assert_eq!(cache.len(), 2);
    ///
    /// cache.clear();
    /// assert!(cache.is_empty());
    /// ```
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// Extends [`CoreCache`] with removal by key, appropriate for policies where
/// plucking an entry out of the middle doesn't violate eviction semantics.
///
/// # Example
///
/// ```
/// use lfukit::traits::{CoreCache, MutableCache};
/// use lfukit::policy::lfu::LfuCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, MutableCache};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.remove(&1), Some("value"));
    /// assert_eq!(cache.remove(&1), None);  // Already removed
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, MutableCache};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.insert(3, "three");
    ///
    /// let removed = cache.remove_batch(&[1, 99, 3]);
    /// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LFU-specific operations with frequency tracking.
///
/// Extends [`MutableCache`] with frequency introspection and eviction of the
/// least frequently used entry. Ties at the lowest frequency break toward the
/// least recently accessed entry.
///
/// # Example
///
/// ```
/// use lfukit::traits::{CoreCache, LfuCacheTrait};
/// use lfukit::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.get(&2);
///
/// // Key 1 is LFU (freq=1 vs freq=2)
/// assert_eq!(cache.peek_lfu(), Some((&1, &"first")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Among entries tied at the lowest frequency, the least recently
    /// accessed one is removed. Returns `None` if the cache is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, LfuCacheTrait};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Access key 2 to increase its frequency
    /// cache.get(&2);
    ///
    /// let (key, _) = cache.pop_lfu().unwrap();
    /// assert_eq!(key, 1);
    /// ```
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the LFU entry without removing it.
    ///
    /// Returns `None` if the cache is empty. Does not increment frequency.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, LfuCacheTrait};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    /// cache.get(&2);  // freq=2
    ///
    /// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
    /// ```
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Gets the access frequency for a key.
    ///
    /// Returns `None` if the key is not found. Does not count as an access.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, LfuCacheTrait};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    /// assert_eq!(cache.frequency(&1), Some(1));
    ///
    /// cache.get(&1);
    /// assert_eq!(cache.frequency(&1), Some(2));
    ///
    /// assert_eq!(cache.frequency(&99), None);
    /// ```
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Resets the frequency counter for a key to 1.
    ///
    /// Returns the old frequency if the key existed, `None` otherwise.
    /// Useful for demoting hot entries after access pattern changes. The
    /// entry becomes the most recently accessed among frequency-1 entries.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, LfuCacheTrait};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    /// cache.get(&1);
    /// cache.get(&1);
    /// assert_eq!(cache.frequency(&1), Some(3));
    ///
    /// assert_eq!(cache.reset_frequency(&1), Some(3));
    /// assert_eq!(cache.frequency(&1), Some(1));
    /// ```
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Increments frequency without accessing the value.
    ///
    /// Returns the new frequency if the key existed, `None` otherwise.
    /// Useful for boosting priority without triggering value access.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::traits::{CoreCache, LfuCacheTrait};
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(10);
    /// cache.insert(1, "value");
    /// assert_eq!(cache.frequency(&1), Some(1));
    ///
    /// assert_eq!(cache.increment_frequency(&1), Some(2));
    /// assert_eq!(cache.increment_frequency(&1), Some(3));
    ///
    /// assert_eq!(cache.increment_frequency(&99), None);
    /// ```
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}
