//! Recompute-on-change cache for expensive derived data
//!
//! Field-line bundles and interference surfaces cost time proportional to
//! their configuration, so they are rebuilt only when their inputs differ
//! from the previous call.

/// Caches a value derived from a key and rebuilds it when the key changes
#[derive(Debug, Clone)]
pub struct ChangeDetector<K, V> {
    entry: Option<(K, V)>,
    rebuilds: u64,
}

impl<K: PartialEq + Clone, V> ChangeDetector<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            rebuilds: 0,
        }
    }

    /// Cached value for `key`, calling `build` only if `key` differs from
    /// the last one. A failed build leaves the previous entry in place.
    pub fn get_or_rebuild<E>(
        &mut self,
        key: &K,
        build: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<&V, E> {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == *key => (cached, value),
            previous => match build(key) {
                Ok(value) => {
                    self.rebuilds += 1;
                    (key.clone(), value)
                }
                Err(err) => {
                    self.entry = previous;
                    return Err(err);
                }
            },
        };

        let (_, value) = self.entry.insert(entry);
        Ok(value)
    }

    pub fn get(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    /// Number of times the value has been built
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Force the next call to rebuild
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<K: PartialEq + Clone, V> Default for ChangeDetector<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
