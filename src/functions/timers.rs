//! Timer-based decorators: delay, defer, throttle and debounce.
//!
//! All of them schedule work on the tokio runtime that is current when the
//! decorator is created (or when `delay` is called). Creating one outside a
//! runtime fails with [`UnderbarError::NoRuntime`].

use crate::error::{Result, UnderbarError};
use crate::options::{ThrottleConfig, ThrottleOptions};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

/// Type alias for a wrapped callback
pub type TimedFn<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

/// A timer that runs a callback once unless cancelled first.
///
/// Dropping the timer cancels it.
pub(crate) struct CancellableTimer {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl CancellableTimer {
    /// Spawn a timer on `runtime` that executes `callback` after `duration`
    pub(crate) fn new<F>(runtime: &Handle, duration: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel();

        runtime.spawn(async move {
            tokio::select! {
                _ = sleep(duration) => {
                    callback();
                }
                _ = cancel_rx => {
                    trace!("Timer cancelled");
                }
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
        }
    }

    /// Cancel the timer
    pub(crate) fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Handle to a call scheduled by [`delay`].
///
/// Dropping the handle leaves the call scheduled.
#[derive(Debug)]
pub struct DelayHandle {
    task: JoinHandle<()>,
}

impl DelayHandle {
    /// Stop the call from running if it has not started yet
    pub fn cancel(&self) {
        debug!("Cancelling delayed call");
        self.task.abort();
    }

    /// Whether the call has run (or was cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Run `func(args)` once after `wait`, without blocking the caller.
///
/// The return value of `func` is discarded.
pub fn delay<F, A>(func: F, wait: Duration, args: A) -> Result<DelayHandle>
where
    F: FnOnce(A) + Send + 'static,
    A: Send + 'static,
{
    let runtime = Handle::try_current()?;
    debug!("Scheduling delayed call in {:?}", wait);
    let task = runtime.spawn(async move {
        sleep(wait).await;
        func(args);
    });
    Ok(DelayHandle { task })
}

/// Run `func(args)` as soon as the runtime gets to it; [`delay`] with no wait.
pub fn defer<F, A>(func: F, args: A) -> Result<DelayHandle>
where
    F: FnOnce(A) + Send + 'static,
    A: Send + 'static,
{
    delay(func, Duration::ZERO, args)
}

struct ThrottleState<A> {
    /// Start of the current window, `None` when idle
    window_start: Option<Instant>,
    /// Latest arguments waiting for the trailing edge
    pending: Option<A>,
    timer: Option<CancellableTimer>,
    /// Bumped whenever a trailing timer is scheduled or abandoned
    generation: u64,
}

/// Runs the wrapped function at most once per window.
///
/// With the default options the first call of an idle period runs right
/// away and later calls inside the window are collapsed into one trailing
/// call, made at the window boundary with the latest arguments. With
/// `trailing(false)` calls inside the window are dropped instead. With
/// `leading(false)` even the first call waits for the window boundary.
///
/// Dropping the throttle drops its pending trailing call.
pub struct Throttle<A> {
    func: TimedFn<A>,
    config: ThrottleConfig,
    state: Arc<Mutex<ThrottleState<A>>>,
    runtime: Option<Handle>,
}

impl<A: Send + 'static> Throttle<A> {
    pub fn new(
        func: impl Fn(A) + Send + Sync + 'static,
        options: impl Into<ThrottleOptions>,
    ) -> Result<Self> {
        let config = ThrottleConfig::try_from(options.into())?;
        let runtime = if config.trailing || !config.leading {
            Some(Handle::try_current()?)
        } else {
            Handle::try_current().ok()
        };

        Ok(Self {
            func: Arc::new(func),
            config,
            state: Arc::new(Mutex::new(ThrottleState {
                window_start: None,
                pending: None,
                timer: None,
                generation: 0,
            })),
            runtime,
        })
    }

    /// Offer a call. Returns `true` if the function ran during this call.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock();

        if state.window_start.is_none() && !self.config.leading {
            state.window_start = Some(now);
        }

        let remaining = state
            .window_start
            .map(|start| self.config.wait.saturating_sub(now.duration_since(start)))
            .unwrap_or(Duration::ZERO);

        if remaining.is_zero() {
            if let Some(mut timer) = state.timer.take() {
                timer.cancel();
            }
            state.pending = None;
            state.generation += 1;
            state.window_start = Some(now);
            drop(state);

            trace!("Throttle running call on leading edge");
            (self.func)(args);
            return true;
        }

        if !self.config.trailing {
            trace!("Throttle dropped call inside window ({:?} left)", remaining);
            return false;
        }

        state.pending = Some(args);
        if state.timer.is_none() {
            if let Err(err) = self.schedule_trailing(&mut state, remaining) {
                debug!("Throttle could not schedule trailing call: {}", err);
                state.pending = None;
            }
        }
        false
    }

    fn schedule_trailing(&self, state: &mut ThrottleState<A>, after: Duration) -> Result<()> {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| UnderbarError::no_runtime("throttle was created outside a runtime"))?;

        state.generation += 1;
        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let func = Arc::clone(&self.func);
        let leading = self.config.leading;

        trace!("Throttle deferring call by {:?}", after);
        state.timer = Some(CancellableTimer::new(runtime, after, move || {
            let pending = {
                let mut state = shared.lock();
                if state.generation != generation {
                    return;
                }
                state.timer = None;
                state.window_start = if leading { Some(Instant::now()) } else { None };
                state.pending.take()
            };
            if let Some(args) = pending {
                trace!("Throttle running call on trailing edge");
                func(args);
            }
        }));
        Ok(())
    }

    /// Drop any pending trailing call and reset the window
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        if let Some(mut timer) = state.timer.take() {
            timer.cancel();
        }
        state.pending = None;
        state.window_start = None;
        state.generation += 1;
        debug!("Throttle cancelled");
    }

    /// Whether a trailing call is waiting for the window boundary
    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }
}

impl<A> Drop for Throttle<A> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if let Some(mut timer) = state.timer.take() {
            timer.cancel();
        }
        state.pending = None;
        state.generation += 1;
    }
}

/// Wrap `func` so it runs at most once per window; see [`Throttle`].
pub fn throttle<A: Send + 'static>(
    func: impl Fn(A) + Send + Sync + 'static,
    options: impl Into<ThrottleOptions>,
) -> Result<Throttle<A>> {
    Throttle::new(func, options)
}

/// Postpones the wrapped function until calls stop for `wait`.
///
/// Every call restarts the timer; only the last call's arguments are used.
pub struct Debounce<A> {
    func: TimedFn<A>,
    wait: Duration,
    timer: Arc<Mutex<Option<CancellableTimer>>>,
    runtime: Handle,
}

impl<A: Send + 'static> Debounce<A> {
    pub fn new(func: impl Fn(A) + Send + Sync + 'static, wait: Duration) -> Result<Self> {
        Ok(Self {
            func: Arc::new(func),
            wait,
            timer: Arc::new(Mutex::new(None)),
            runtime: Handle::try_current()?,
        })
    }

    pub fn call(&self, args: A) {
        let mut timer_guard = self.timer.lock();

        // Cancel existing timer
        if let Some(ref mut timer) = *timer_guard {
            trace!("Debounce restarting timer");
            timer.cancel();
        }

        let func = self.func.clone();
        *timer_guard = Some(CancellableTimer::new(&self.runtime, self.wait, move || {
            func(args);
        }));
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        if let Some(mut timer) = self.timer.lock().take() {
            timer.cancel();
        }
    }
}

/// Wrap `func` so it only runs once calls have stopped for `wait`; see
/// [`Debounce`].
pub fn debounce<A: Send + 'static>(
    func: impl Fn(A) + Send + Sync + 'static,
    wait: Duration,
) -> Result<Debounce<A>> {
    Debounce::new(func, wait)
}
