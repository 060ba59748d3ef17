//! Call-once wrapper.

use parking_lot::Mutex;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

enum State<F, R> {
    Pending(F),
    Running,
    Done(R),
}

/// Wraps `func` so it runs at most once.
///
/// The first call runs `func` with its argument; that call and every later
/// one return the same result. State is guarded by a mutex, so concurrent
/// first calls still run `func` only once. The mutex stays held while `func`
/// runs, so `func` must not call back into the same `Once`.
pub struct Once<F, A, R> {
    state: Mutex<State<F, R>>,
    _args: PhantomData<fn(A) -> R>,
}

impl<F, A, R> Once<F, A, R>
where
    F: FnOnce(A) -> R,
    R: Clone,
{
    pub fn new(func: F) -> Self {
        Self {
            state: Mutex::new(State::Pending(func)),
            _args: PhantomData,
        }
    }

    /// Run the wrapped function on the first call, then replay its result
    pub fn call(&self, args: A) -> R {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, State::Running) {
            State::Pending(func) => {
                trace!("Running once-wrapped function");
                let result = func(args);
                *state = State::Done(result.clone());
                result
            }
            State::Done(result) => {
                *state = State::Done(result.clone());
                result
            }
            State::Running => panic!("once-wrapped function panicked on its first call"),
        }
    }

    /// Whether the wrapped function has already run
    pub fn is_called(&self) -> bool {
        !matches!(*self.state.lock(), State::Pending(_))
    }

    /// The cached result, if the wrapped function has run
    pub fn result(&self) -> Option<R> {
        match &*self.state.lock() {
            State::Done(result) => Some(result.clone()),
            _ => None,
        }
    }
}

impl<F, A, R> fmt::Debug for Once<F, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let called = !matches!(*self.state.lock(), State::Pending(_));
        f.debug_struct("Once").field("called", &called).finish()
    }
}

/// Wrap `func` so it runs at most once; see [`Once`].
pub fn once<F, A, R>(func: F) -> Once<F, A, R>
where
    F: FnOnce(A) -> R,
    R: Clone,
{
    Once::new(func)
}
