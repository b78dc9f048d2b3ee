use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Weak};

struct MapValue<K, V> {
    weak: Weak<K>,
    value: V,
}

/// A special form of a concurrent hash map that is optimized to store values that are derived from an Arc<K>.
/// It thus allows freeing of the Arc<K> and is used for derivative data that tracks K, but also doesn't need to exist
/// anymore when K is gone. Internally it uses the address of the allocation as the hash key and prunes expired weaks
/// before the map would have to grow. An entry whose weak has expired is stale even if the address matches, as the
/// allocation may have been reused by an unrelated K.
pub struct WeakKeyDashMap<K, V> {
    inner: DashMap<usize, MapValue<K, V>>,
}

impl<K, V: Clone> WeakKeyDashMap<K, V> {
    pub fn new() -> Self {
        Self { inner: DashMap::new() }
    }

    fn address(key: &Arc<K>) -> usize {
        Arc::as_ptr(key) as usize
    }

    pub fn get(&self, key: &Arc<K>) -> Option<V> {
        let entry = self.inner.get(&Self::address(key))?;
        (entry.weak.strong_count() > 0).then(|| entry.value.clone())
    }

    /// Returns the value for `key`, inserting `compute()` first if there is none. `compute` runs while the shard
    /// lock is held, so it should only construct a cheap placeholder.
    pub fn get_or_insert_with<F>(&self, key: &Arc<K>, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.try_prune();

        match self.inner.entry(Self::address(key)) {
            Entry::Occupied(mut entry) => {
                if entry.get().weak.strong_count() == 0 {
                    entry.insert(MapValue {
                        weak: Arc::downgrade(key),
                        value: compute(),
                    });
                }
                entry.get().value.clone()
            }
            Entry::Vacant(entry) => {
                let value = compute();
                entry.insert(MapValue {
                    weak: Arc::downgrade(key),
                    value: value.clone(),
                });
                value
            }
        }
    }

    #[inline]
    fn try_prune(&self) {
        // Would have to allocate after the next insert.
        if self.inner.capacity() == self.inner.len() {
            self.inner.retain(|_, v| v.weak.strong_count() > 0);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V: Clone> Default for WeakKeyDashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
