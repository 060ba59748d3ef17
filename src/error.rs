//! Error types for the underbar library.

use thiserror::Error;

/// Result type alias for underbar operations
pub type Result<T> = std::result::Result<T, UnderbarError>;

/// Main error type for the underbar library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnderbarError {
    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    #[error("No timer runtime: {message}")]
    NoRuntime { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl UnderbarError {
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    pub fn no_runtime(msg: impl Into<String>) -> Self {
        Self::NoRuntime {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
impl From<tokio::runtime::TryCurrentError> for UnderbarError {
    fn from(err: tokio::runtime::TryCurrentError) -> Self {
        Self::no_runtime(err.to_string())
    }
}
