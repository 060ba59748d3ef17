//! Function decorators.

pub mod memoize;
pub mod once;
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub mod timers;

pub use memoize::{memoize, memoize_by, Memoize};
pub use once::{once, Once};
#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
pub use timers::{debounce, defer, delay, throttle, Debounce, DelayHandle, Throttle};
