//! Named-field access for `pluck` and field-based sorting.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Elements that expose values by field name
pub trait Fields {
    type Value;

    /// Look up a field, `None` if the element has no such field
    fn field(&self, name: &str) -> Option<&Self::Value>;
}

impl<V, S: BuildHasher> Fields for HashMap<String, V, S> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Fields for BTreeMap<String, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V, S: BuildHasher> Fields for HashMap<&str, V, S> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Fields for BTreeMap<&str, V> {
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

/// Objects expose their members; any other JSON value has no fields.
impl Fields for Value {
    type Value = Value;

    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(name))
    }
}
