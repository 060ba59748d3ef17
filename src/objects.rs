//! Helpers for merging mappings.

use crate::collections::Collection;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A mapping that `extend` and `defaults` can write into
pub trait Assign<K, V> {
    fn has_key(&self, key: &K) -> bool;
    fn assign(&mut self, key: K, value: V);
}

impl<K: Eq + Hash, V, S: BuildHasher> Assign<K, V> for HashMap<K, V, S> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn assign(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Ord, V> Assign<K, V> for BTreeMap<K, V> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn assign(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Copy every entry of each source into `target`, in order.
///
/// Later sources overwrite earlier ones, and any source overwrites what
/// `target` already held. Returns `target`.
///
/// ```
/// use std::collections::HashMap;
/// use underbar::objects::extend;
///
/// let mut target = HashMap::from([("key1", "something")]);
/// let extra = HashMap::from([("key2", "something new")]);
/// extend(&mut target, &[&extra]);
/// assert_eq!(target.len(), 2);
/// ```
pub fn extend<'t, 's, T, S, K, V>(target: &'t mut T, sources: &'s [&'s S]) -> &'t mut T
where
    T: Assign<K, V> + ?Sized,
    S: Collection<'s, Key = &'s K, Item = V> + ?Sized,
    K: Clone + 's,
    V: Clone + 's,
{
    sources.each(|source, _, _| {
        let source: &'s S = source;
        source.each(|value, key, _| target.assign(key.clone(), value.clone()));
    });
    target
}

/// Like [`extend`], but never overwrite a key `target` already holds.
///
/// The first source to supply a key wins over later ones.
pub fn defaults<'t, 's, T, S, K, V>(target: &'t mut T, sources: &'s [&'s S]) -> &'t mut T
where
    T: Assign<K, V> + ?Sized,
    S: Collection<'s, Key = &'s K, Item = V> + ?Sized,
    K: Clone + 's,
    V: Clone + 's,
{
    sources.each(|source, _, _| {
        let source: &'s S = source;
        source.each(|value, key, _| {
            if !target.has_key(key) {
                target.assign(key.clone(), value.clone());
            }
        });
    });
    target
}
