//! Generic attribute map handed to every resource operation
//!
//! `ResourceData` carries the resource ID, the attributes recorded in state
//! before the operation (`prior`) and the attributes the operation works on.
//! Handlers read desired values from it and write remote values back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted state of one resource: `{"id": ..., "attributes": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Attribute map of a resource under operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    prior: Map<String, Value>,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Data for a resource that does not exist yet
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            prior: Map::new(),
            attributes,
        }
    }

    /// Data for an existing resource, as recorded in state
    pub fn from_state(state: ResourceState) -> Self {
        Self {
            id: state.id,
            prior: state.attributes.clone(),
            attributes: state.attributes,
        }
    }

    /// Data for an update: `prior` is the recorded state, `attributes` the planned values
    pub fn with_prior(id: impl Into<String>, prior: Map<String, Value>, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            prior,
            attributes,
        }
    }

    /// Data for an import, which only knows the remote reference
    pub fn for_import(reference: impl Into<String>) -> Self {
        Self {
            id: reference.into(),
            ..Default::default()
        }
    }

    /// Remote reference; empty when the resource does not exist
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record the remote reference
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// True until the resource has been created
    pub fn is_new_resource(&self) -> bool {
        self.prior.is_empty() && self.id.is_empty()
    }

    /// Attribute value; null counts as unset
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Whether the attribute is set
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String attribute; empty strings count as unset
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// String attribute or an empty string
    pub fn get_string(&self, key: &str) -> String {
        self.get_str(key).unwrap_or_default().to_string()
    }

    /// Integer attribute
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Boolean attribute
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// List attribute; an unset list is empty
    pub fn get_list(&self, key: &str) -> Vec<Value> {
        self.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// List of strings, skipping non-string entries
    pub fn get_str_list(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// Value recorded in state before this operation
    pub fn get_prior(&self, key: &str) -> Option<&Value> {
        self.prior.get(key).filter(|v| !v.is_null())
    }

    /// `(old, new)` for an attribute
    pub fn get_change(&self, key: &str) -> (Option<&Value>, Option<&Value>) {
        (self.get_prior(key), self.get(key))
    }

    /// True when the attribute differs from what state recorded
    pub fn has_change(&self, key: &str) -> bool {
        let (old, new) = self.get_change(key);
        old != new
    }

    /// Set an attribute, overwriting any previous value
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Unset an attribute
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Current attribute values
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Copy taken before an update so a failure can be rolled back
    pub fn snapshot(&self) -> ResourceData {
        self.clone()
    }

    /// Put back a snapshot taken with [`ResourceData::snapshot`]
    pub fn restore(&mut self, snapshot: ResourceData) {
        *self = snapshot;
    }

    /// State to persist after the operation
    pub fn into_state(self) -> ResourceState {
        ResourceState {
            id: self.id,
            attributes: self.attributes,
        }
    }
}
