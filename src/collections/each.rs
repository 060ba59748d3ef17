//! The iteration primitive.
//!
//! [`Collection::each`] is the only place in the crate that reads a
//! collection's elements directly. Every other operation visits elements
//! through it, so implementing [`Collection`] for a new container is enough
//! to make the whole operation set available for it.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

/// A container whose elements can be visited one by one.
///
/// `'a` is the borrow of the container; yielded values and keys live for it.
pub trait Collection<'a> {
    /// Element type
    type Item: 'a;
    /// Position of an element: an index for sequences, a key reference for maps
    type Key;

    /// Call `iterator(value, key, collection)` once for every element.
    ///
    /// Sequences are visited in index order `0..len`. Maps are visited in
    /// their own enumeration order, which is stable for one call but not
    /// guaranteed across implementations.
    fn each<F>(&'a self, iterator: F)
    where
        F: FnMut(&'a Self::Item, Self::Key, &'a Self);

    /// Number of elements
    fn len(&'a self) -> usize;

    fn is_empty(&'a self) -> bool {
        self.len() == 0
    }
}

/// A collection addressed by `usize` index.
pub trait Sequence<'a>: Collection<'a, Key = usize> {}

impl<'a, C> Sequence<'a> for C where C: Collection<'a, Key = usize> + ?Sized {}

impl<'a, T: 'a> Collection<'a> for [T] {
    type Item = T;
    type Key = usize;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for index in 0..<[T]>::len(self) {
            iterator(&self[index], index, self);
        }
    }

    fn len(&'a self) -> usize {
        <[T]>::len(self)
    }
}

impl<'a, T: 'a, const N: usize> Collection<'a> for [T; N] {
    type Item = T;
    type Key = usize;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        self.as_slice().each(|value, index, _| iterator(value, index, self));
    }

    fn len(&'a self) -> usize {
        N
    }
}

impl<'a, T: 'a> Collection<'a> for Vec<T> {
    type Item = T;
    type Key = usize;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        self.as_slice().each(|value, index, _| iterator(value, index, self));
    }

    fn len(&'a self) -> usize {
        Vec::len(self)
    }
}

impl<'a, T: 'a> Collection<'a> for VecDeque<T> {
    type Item = T;
    type Key = usize;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for (index, value) in self.iter().enumerate() {
            iterator(value, index, self);
        }
    }

    fn len(&'a self) -> usize {
        VecDeque::len(self)
    }
}

impl<'a, K: 'a, V: 'a, S: BuildHasher> Collection<'a> for HashMap<K, V, S> {
    type Item = V;
    type Key = &'a K;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a V, &'a K, &'a Self),
    {
        for (key, value) in self {
            iterator(value, key, self);
        }
    }

    fn len(&'a self) -> usize {
        HashMap::len(self)
    }
}

impl<'a, K: 'a, V: 'a> Collection<'a> for BTreeMap<K, V> {
    type Item = V;
    type Key = &'a K;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a V, &'a K, &'a Self),
    {
        for (key, value) in self {
            iterator(value, key, self);
        }
    }

    fn len(&'a self) -> usize {
        BTreeMap::len(self)
    }
}

/// Position of an element inside a JSON array or object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKey<'a> {
    Index(usize),
    Field(&'a str),
}

/// Arrays yield their items, objects their field values. Scalars hold no
/// elements.
impl<'a> Collection<'a> for Value {
    type Item = Value;
    type Key = JsonKey<'a>;

    fn each<F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a Value, JsonKey<'a>, &'a Self),
    {
        match self {
            Value::Array(items) => {
                items.each(|value, index, _| iterator(value, JsonKey::Index(index), self));
            }
            Value::Object(fields) => {
                for (name, value) in fields {
                    iterator(value, JsonKey::Field(name.as_str()), self);
                }
            }
            _ => {}
        }
    }

    fn len(&'a self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(fields) => fields.len(),
            _ => 0,
        }
    }
}
