//! Collection operations derived from [`Collection::each`].
//!
//! None of these touch a collection's storage; they only observe what
//! `each` hands them, so they work unchanged for every [`Collection`].
//!
//! An absent collection is an `Option<&C>`. The operations that build a new
//! collection have `_of` variants that pass `None` through; the ones that
//! already return an `Option` compose with `and_then`:
//!
//! ```
//! use underbar::{first, index_of};
//!
//! let missing: Option<&Vec<i32>> = None;
//! assert_eq!(missing.and_then(|seq| first(seq)), None);
//! assert_eq!(missing.and_then(|seq| index_of(seq, &3)), None);
//! ```

use super::each::{Collection, Sequence};
use super::fields::Fields;
use super::invoke::{Method, MethodTable};
use super::truthy::Truthy;
use crate::error::Result;

/// The first element of a sequence, `None` when it is empty
pub fn first<'a, S>(seq: &'a S) -> Option<&'a S::Item>
where
    S: Sequence<'a> + ?Sized,
{
    let mut found = None;
    seq.each(|value, index, _| {
        if index == 0 {
            found = Some(value);
        }
    });
    found
}

/// The leading `n` elements (all of them if the sequence is shorter)
pub fn first_n<'a, S>(seq: &'a S, n: usize) -> Vec<S::Item>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
{
    let mut taken = Vec::with_capacity(n.min(seq.len()));
    seq.each(|value, index, _| {
        if index < n {
            taken.push(value.clone());
        }
    });
    taken
}

/// [`first_n`] for a collection that may be absent; `None` passes through.
pub fn first_n_of<'a, S>(seq: Option<&'a S>, n: usize) -> Option<Vec<S::Item>>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
{
    seq.map(|seq| first_n(seq, n))
}

/// The last element of a sequence, `None` when it is empty
pub fn last<'a, S>(seq: &'a S) -> Option<&'a S::Item>
where
    S: Sequence<'a> + ?Sized,
{
    let mut found = None;
    seq.each(|value, _, _| found = Some(value));
    found
}

/// The trailing `n` elements (all of them if the sequence is shorter)
pub fn last_n<'a, S>(seq: &'a S, n: usize) -> Vec<S::Item>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
{
    let start = seq.len().saturating_sub(n);
    let mut taken = Vec::with_capacity(seq.len() - start);
    seq.each(|value, index, _| {
        if n > 0 && index >= start {
            taken.push(value.clone());
        }
    });
    taken
}

/// [`last_n`] for a collection that may be absent; `None` passes through.
pub fn last_n_of<'a, S>(seq: Option<&'a S>, n: usize) -> Option<Vec<S::Item>>
where
    S: Sequence<'a> + ?Sized,
    S::Item: Clone,
{
    seq.map(|seq| last_n(seq, n))
}

/// Index of the first element equal to `target`
pub fn index_of<'a, S>(seq: &'a S, target: &S::Item) -> Option<usize>
where
    S: Sequence<'a> + ?Sized,
    S::Item: PartialEq,
{
    let mut position = None;
    seq.each(|value, index, _| {
        if position.is_none() && value == target {
            position = Some(index);
        }
    });
    position
}

/// Elements passing `predicate`, in traversal order
pub fn filter<'a, C, P>(collection: &'a C, mut predicate: P) -> Vec<C::Item>
where
    C: Collection<'a> + ?Sized,
    C::Item: Clone,
    P: FnMut(&'a C::Item) -> bool,
{
    let mut kept = Vec::new();
    collection.each(|value, _, _| {
        if predicate(value) {
            kept.push(value.clone());
        }
    });
    kept
}

/// Elements failing `predicate`, in traversal order
pub fn reject<'a, C, P>(collection: &'a C, mut predicate: P) -> Vec<C::Item>
where
    C: Collection<'a> + ?Sized,
    C::Item: Clone,
    P: FnMut(&'a C::Item) -> bool,
{
    filter(collection, move |value| !predicate(value))
}

/// Distinct elements, keeping first occurrences in order
pub fn uniq<'a, C>(collection: &'a C) -> Vec<C::Item>
where
    C: Collection<'a> + ?Sized,
    C::Item: PartialEq + Clone,
{
    let mut seen: Vec<C::Item> = Vec::new();
    collection.each(|value, _, _| {
        if index_of(seen.as_slice(), value).is_none() {
            seen.push(value.clone());
        }
    });
    seen
}

/// Apply `iterator` to every element, in traversal order
pub fn map<'a, C, U, F>(collection: &'a C, mut iterator: F) -> Vec<U>
where
    C: Collection<'a> + ?Sized,
    F: FnMut(&'a C::Item) -> U,
{
    let mut mapped = Vec::with_capacity(collection.len());
    collection.each(|value, _, _| mapped.push(iterator(value)));
    mapped
}

/// The `name` field of every element, `None` where it is missing
pub fn pluck<'a, C>(collection: &'a C, name: &str) -> Vec<Option<<C::Item as Fields>::Value>>
where
    C: Collection<'a> + ?Sized,
    C::Item: Fields,
    <C::Item as Fields>::Value: Clone,
{
    map(collection, |value| value.field(name).cloned())
}

/// Run a method on every element with the same arguments.
///
/// `Method::Func` calls the given function; `Method::Named` resolves the tag
/// through `table` first and fails without visiting any element if the tag
/// is not registered.
pub fn invoke<'a, C, A, R>(
    collection: &'a C,
    table: &MethodTable<C::Item, A, R>,
    method: Method<'_, C::Item, A, R>,
    args: &A,
) -> Result<Vec<R>>
where
    C: Collection<'a> + ?Sized,
{
    match method {
        Method::Func(func) => Ok(map(collection, |value| func(value, args))),
        Method::Named(name) => {
            let func = table.resolve(name)?;
            Ok(map(collection, |value| func(value, args)))
        }
    }
}

/// Fold the collection into `acc = iterator(acc, value)`, seeded with `initial`
pub fn reduce<'a, C, A, F>(collection: &'a C, mut iterator: F, initial: A) -> A
where
    C: Collection<'a> + ?Sized,
    F: FnMut(A, &'a C::Item) -> A,
{
    let mut acc = Some(initial);
    collection.each(|value, _, _| {
        acc = acc.take().map(|prev| iterator(prev, value));
    });
    match acc {
        Some(acc) => acc,
        // each step puts the accumulator back before returning
        None => unreachable!("reduce accumulator lost"),
    }
}

/// [`reduce`] seeded with `A::default()`, i.e. zero for numbers
pub fn reduce_default<'a, C, A, F>(collection: &'a C, iterator: F) -> A
where
    C: Collection<'a> + ?Sized,
    A: Default,
    F: FnMut(A, &'a C::Item) -> A,
{
    reduce(collection, iterator, A::default())
}

/// Whether any element equals `target`
pub fn contains<'a, C>(collection: &'a C, target: &C::Item) -> bool
where
    C: Collection<'a> + ?Sized,
    C::Item: PartialEq,
{
    reduce(
        collection,
        |was_found, item| was_found || item == target,
        false,
    )
}

/// Whether every element passes `predicate`; true for an empty collection
pub fn every<'a, C, P>(collection: &'a C, mut predicate: P) -> bool
where
    C: Collection<'a> + ?Sized,
    P: FnMut(&'a C::Item) -> bool,
{
    reduce(collection, |passed, value| passed && predicate(value), true)
}

/// [`every`] with truthiness as the predicate
pub fn every_truthy<'a, C>(collection: &'a C) -> bool
where
    C: Collection<'a> + ?Sized,
    C::Item: Truthy,
{
    every(collection, |value| value.is_truthy())
}

/// Whether any element passes `predicate`; false for an empty collection.
///
/// Computed as "not every element fails".
pub fn some<'a, C, P>(collection: &'a C, mut predicate: P) -> bool
where
    C: Collection<'a> + ?Sized,
    P: FnMut(&'a C::Item) -> bool,
{
    !every(collection, |value| !predicate(value))
}

/// [`some`] with truthiness as the predicate
pub fn some_truthy<'a, C>(collection: &'a C) -> bool
where
    C: Collection<'a> + ?Sized,
    C::Item: Truthy,
{
    some(collection, |value| value.is_truthy())
}
