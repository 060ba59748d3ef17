//! Result caching for single-argument functions.

use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Type alias for the wrapped function
pub type MemoFn<A, R> = Box<dyn Fn(&A) -> R + Send + Sync + 'static>;

/// Type alias for the cache-key function
pub type KeyFn<A, K> = Box<dyn Fn(&A) -> K + Send + Sync + 'static>;

/// Caches the results of `func` per key.
///
/// A repeated call with an equal key returns the cached result without
/// running `func`. The cache entry for a key stays locked while `func`
/// computes it, so concurrent callers with the same key wait and share one
/// result. `func` must not call back into the same `Memoize` with a key in
/// the same shard.
pub struct Memoize<A, K, R> {
    func: MemoFn<A, R>,
    key_fn: KeyFn<A, K>,
    cache: DashMap<K, R>,
}

impl<A, K, R> Memoize<A, K, R>
where
    K: Eq + Hash,
    R: Clone,
{
    /// Wrap `func`, keying the cache by `key_fn(arg)`
    pub fn with_key(
        func: impl Fn(&A) -> R + Send + Sync + 'static,
        key_fn: impl Fn(&A) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            func: Box::new(func),
            key_fn: Box::new(key_fn),
            cache: DashMap::new(),
        }
    }

    /// Return the cached result for `arg`, computing it on first use
    pub fn call(&self, arg: A) -> R {
        let key = (self.key_fn)(&arg);
        if let Some(hit) = self.cache.get(&key) {
            return hit.value().clone();
        }

        self.cache
            .entry(key)
            .or_insert_with(|| {
                trace!("Memoize cache miss");
                (self.func)(&arg)
            })
            .value()
            .clone()
    }

    /// Whether a result is cached for `arg`
    pub fn is_cached(&self, arg: &A) -> bool {
        self.cache.contains_key(&(self.key_fn)(arg))
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Forget every cached result
    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl<K, R> Memoize<K, K, R>
where
    K: Eq + Hash + Clone + 'static,
    R: Clone,
{
    /// Wrap `func`, keying the cache by the argument itself
    pub fn new(func: impl Fn(&K) -> R + Send + Sync + 'static) -> Self {
        Self::with_key(func, K::clone)
    }
}

impl<A, K, R> fmt::Debug for Memoize<A, K, R>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoize")
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// Cache `func`'s results keyed by its argument; see [`Memoize`].
pub fn memoize<K, R>(func: impl Fn(&K) -> R + Send + Sync + 'static) -> Memoize<K, K, R>
where
    K: Eq + Hash + Clone + 'static,
    R: Clone,
{
    Memoize::new(func)
}

/// Cache `func`'s results keyed by `key_fn(arg)`.
///
/// Use this when the argument is not itself hashable or when several
/// arguments should share a cache entry.
pub fn memoize_by<A, K, R>(
    func: impl Fn(&A) -> R + Send + Sync + 'static,
    key_fn: impl Fn(&A) -> K + Send + Sync + 'static,
) -> Memoize<A, K, R>
where
    K: Eq + Hash,
    R: Clone,
{
    Memoize::with_key(func, key_fn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_caches_by_argument() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let square = memoize(move |n: &u64| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            n * n
        });

        assert_eq!(square.call(4), 16);
        assert_eq!(square.call(4), 16);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(square.call(5), 25);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(square.len(), 2);
    }

    #[test]
    fn test_clear() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let upper = memoize(move |s: &String| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            s.to_uppercase()
        });

        upper.call("abc".to_string());
        assert!(upper.is_cached(&"abc".to_string()));
        upper.clear();
        assert!(upper.is_empty());
        upper.call("abc".to_string());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_memoize_by_custom_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let total = memoize_by(
            move |pair: &(i32, i32)| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
                pair.0 + pair.1
            },
            |pair: &(i32, i32)| (pair.0.min(pair.1), pair.0.max(pair.1)),
        );

        assert_eq!(total.call((1, 2)), 3);
        assert_eq!(total.call((2, 1)), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_callers_same_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let slow = Arc::new(memoize(move |n: &u32| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            n + 1
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slow = slow.clone();
                std::thread::spawn(move || slow.call(7))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 8);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
