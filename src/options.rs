//! Configuration options for the timer-based decorators.

use crate::error::{Result, UnderbarError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration options for a throttled function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleOptions {
    /// Window length in milliseconds (default: 0)
    #[serde(default)]
    pub wait_ms: Option<u64>,

    /// Run the first call of an idle period immediately (default: true)
    #[serde(default)]
    pub leading: Option<bool>,

    /// Defer the latest call made inside the window to the window boundary
    /// instead of dropping it (default: true)
    #[serde(default)]
    pub trailing: Option<bool>,

    /// Window length at full precision when built from a `Duration`
    #[serde(skip)]
    exact_wait: Option<Duration>,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            wait_ms: Some(0),
            leading: Some(true),
            trailing: Some(true),
            exact_wait: None,
        }
    }
}

impl ThrottleOptions {
    /// Create new options with just the window length
    pub fn new(wait: Duration) -> Self {
        Self::default().wait(wait)
    }

    /// Builder pattern: set window length; sub-millisecond parts are kept
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait_ms = Some(u64::try_from(wait.as_millis()).unwrap_or(u64::MAX));
        self.exact_wait = Some(wait);
        self
    }

    /// Builder pattern: set window length in milliseconds
    pub fn wait_ms(mut self, wait_ms: u64) -> Self {
        self.wait_ms = Some(wait_ms);
        self.exact_wait = None;
        self
    }

    /// Builder pattern: enable/disable the leading-edge call
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = Some(leading);
        self
    }

    /// Builder pattern: enable/disable the trailing-edge call
    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = Some(trailing);
        self
    }

    /// Get window duration
    pub fn get_wait(&self) -> Duration {
        self.exact_wait
            .unwrap_or_else(|| Duration::from_millis(self.wait_ms.unwrap_or(0)))
    }

    pub fn is_leading(&self) -> bool {
        self.leading.unwrap_or(true)
    }

    pub fn is_trailing(&self) -> bool {
        self.trailing.unwrap_or(true)
    }

    /// Reject option combinations that would never run the function
    pub fn validate(&self) -> Result<()> {
        if !self.is_leading() && !self.is_trailing() {
            return Err(UnderbarError::config(
                "throttle needs at least one of leading or trailing enabled",
            ));
        }
        Ok(())
    }
}

/// Internal configuration derived from ThrottleOptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub wait: Duration,
    pub leading: bool,
    pub trailing: bool,
}

impl TryFrom<ThrottleOptions> for ThrottleConfig {
    type Error = UnderbarError;

    fn try_from(opts: ThrottleOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            wait: opts.get_wait(),
            leading: opts.is_leading(),
            trailing: opts.is_trailing(),
        })
    }
}

impl From<Duration> for ThrottleOptions {
    fn from(wait: Duration) -> Self {
        Self::new(wait)
    }
}
