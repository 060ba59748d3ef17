//! # Underbar
//!
//! Functional-style helpers over sequences and mappings, plus a handful of
//! function decorators.
//!
//! ## Features
//!
//! - A single iteration primitive, [`Collection::each`], implemented for
//!   slices, arrays, `Vec`, `VecDeque`, `HashMap`, `BTreeMap` and JSON values
//! - filter / reject / uniq / map / pluck / invoke / reduce / contains /
//!   every / some, all built on `each`
//! - extend / defaults for merging mappings
//! - once / memoize decorators with thread-safe state
//! - delay / defer / throttle / debounce on the tokio timer
//! - sort_by / zip / flatten / intersection / difference / shuffle
//!
//! ## Example
//!
//! ```
//! use underbar::{filter, reduce, uniq};
//!
//! let numbers = vec![1, 2, 2, 3, 4, 4];
//! let evens = filter(&numbers, |n| n % 2 == 0);
//! assert_eq!(evens, vec![2, 2, 4, 4]);
//! assert_eq!(uniq(&evens), vec![2, 4]);
//! assert_eq!(reduce(&numbers, |sum, n| sum + n, 0), 16);
//! ```

pub mod arrays;
pub mod collections;
pub mod functions;
pub mod objects;
pub mod options;

mod error;

// Re-exports
pub use arrays::{
    difference, flatten, flatten_into, intersection, shuffle, shuffle_with, sort_by,
    sort_by_field, zip, zip_pair, Nested, Node, Tree,
};
pub use collections::{
    contains, every, every_truthy, filter, first, first_n, first_n_of, index_of, invoke, last,
    last_n, last_n_of, map, pluck, reduce, reduce_default, reject, some, some_truthy, uniq,
    Collection, Fields, JsonKey, Method, MethodTable, Sequence, Truthy,
};
pub use error::{Result, UnderbarError};
pub use functions::{memoize, memoize_by, once, Memoize, Once};
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use functions::{debounce, defer, delay, throttle, Debounce, DelayHandle, Throttle};
pub use objects::{defaults, extend, Assign};
pub use options::{ThrottleConfig, ThrottleOptions};
