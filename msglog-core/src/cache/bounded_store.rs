// File: src/cache/bounded_store.rs

use indexmap::IndexMap;

/// Keyed collection of ordered record lists with FIFO eviction per key.
///
/// Keys keep their insertion order and each list is oldest-first, so
/// `into_pairs` / `from_pairs` round-trip without reordering anything.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedStore<R> {
    entries: IndexMap<String, Vec<R>>,
}

impl<R> Default for BoundedStore<R> {
    fn default() -> Self {
        Self { entries: IndexMap::new() }
    }
}

impl<R> BoundedStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `record` onto `key`'s list, then drop from the front until the
    /// list holds at most `capacity` records. Returns how many were evicted.
    ///
    /// More than one record is evicted when `capacity` was lowered since the
    /// previous append.
    pub fn append(&mut self, key: &str, record: R, capacity: usize) -> usize {
        let list = self
            .entries
            .entry(key.to_string())
            .or_insert_with(Vec::new);
        list.push(record);

        let excess = list.len().saturating_sub(capacity);
        if excess > 0 {
            list.drain(..excess);
        }
        if list.is_empty() {
            // capacity == 0
            self.entries.shift_remove(key);
        }
        excess
    }

    pub fn get(&self, key: &str) -> Option<&[R]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records across all keys.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Keep only records matching `keep`. Keys left with no records are
    /// removed. Returns the number of records dropped.
    pub fn retain_records<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&R) -> bool,
    {
        let mut removed = 0;
        self.entries.retain(|_, list| {
            let before = list.len();
            list.retain(|r| keep(r));
            removed += before - list.len();
            !list.is_empty()
        });
        removed
    }

    /// Association-list form, in key insertion order.
    pub fn to_pairs(&self) -> Vec<(String, Vec<R>)>
    where
        R: Clone,
    {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Rebuild from an association list. A repeated key replaces the earlier
    /// list but keeps the earlier position.
    pub fn from_pairs(pairs: Vec<(String, Vec<R>)>) -> Self {
        let mut entries = IndexMap::with_capacity(pairs.len());
        for (k, v) in pairs {
            entries.insert(k, v);
        }
        Self { entries }
    }
}
