//! Method tables used by `invoke` to call an operation on every element.

use crate::error::{Result, UnderbarError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for a registered method
pub type MethodFn<T, A, R> = Arc<dyn Fn(&T, &A) -> R + Send + Sync + 'static>;

/// How `invoke` picks the operation to run on each element
pub enum Method<'m, T, A, R> {
    /// Call this function directly
    Func(&'m dyn Fn(&T, &A) -> R),
    /// Resolve this tag through a [`MethodTable`]
    Named(&'m str),
}

impl<'m, T, A, R> From<&'m str> for Method<'m, T, A, R> {
    fn from(name: &'m str) -> Self {
        Method::Named(name)
    }
}

impl<T, A, R> fmt::Debug for Method<'_, T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Func(_) => f.write_str("Func(..)"),
            Method::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// The set of operations an element type supports, keyed by tag.
///
/// Each element is passed as the receiver together with the shared call
/// arguments `A`.
pub struct MethodTable<T, A, R> {
    methods: HashMap<String, MethodFn<T, A, R>>,
}

impl<T, A, R> Default for MethodTable<T, A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A, R> MethodTable<T, A, R> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register an operation under `name`, replacing any previous one
    pub fn register(
        &mut self,
        name: impl Into<String>,
        method: impl Fn(&T, &A) -> R + Send + Sync + 'static,
    ) -> &mut Self {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Builder pattern: register an operation
    pub fn with(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&T, &A) -> R + Send + Sync + 'static,
    ) -> Self {
        self.register(name, method);
        self
    }

    /// Look up an operation by tag
    pub fn resolve(&self, name: &str) -> Result<MethodFn<T, A, R>> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| UnderbarError::unknown_method(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<T, A, R> fmt::Debug for MethodTable<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("MethodTable").field("methods", &names).finish()
    }
}
