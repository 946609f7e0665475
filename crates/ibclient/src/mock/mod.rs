//! Mock WapiConnector for unit testing
//!
//! This module provides an in-memory implementation of `WapiConnector` that can
//! be used in unit tests without a grid master.
//!
//! Beyond plain storage it can:
//! - expand `func:nextavailableip` / `func:nextavailablenetwork` expressions
//! - make a reference stale (`rename_ref`) to simulate out-of-band changes
//! - fail the next create/update/delete with an API error
//! - record every call for assertions

mod helpers;

use crate::common::query::QueryParams;
use crate::connector_trait::WapiConnector;
use crate::error::WapiError;
use helpers::Allocation;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Fields that may carry a `func:` allocation expression
const ALLOCATABLE_FIELDS: &[&str] = &["ipv4addr", "ipv6addr", "network"];

/// Mock connector for testing
///
/// Objects are stored as WAPI JSON keyed by reference.
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub(crate) base_url: String,
    pub(crate) objects: Arc<Mutex<BTreeMap<String, serde_json::Value>>>,
    pub(crate) allocations: Arc<Mutex<HashMap<String, u64>>>,
    pub(crate) failures: Arc<Mutex<HashMap<&'static str, String>>>,
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
    // Counter for generating references
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new("https://mock-gm/wapi/v2.7")
    }
}

impl MockConnector {
    /// Create a new mock connector
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(Mutex::new(BTreeMap::new())),
            allocations: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add an object to the mock store (for test setup), returning its reference
    pub fn add_object(&self, object_type: &str, mut object: serde_json::Value) -> String {
        let reference = self.new_reference(object_type, &object);
        object["_ref"] = serde_json::Value::String(reference.clone());
        self.objects.lock().unwrap().insert(reference.clone(), object);
        reference
    }

    /// Stored object by reference
    pub fn object(&self, reference: &str) -> Option<serde_json::Value> {
        self.objects.lock().unwrap().get(reference).cloned()
    }

    /// All stored objects of a type
    pub fn objects_of_type(&self, object_type: &str) -> Vec<serde_json::Value> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|(reference, _)| type_of(reference) == object_type)
            .map(|(_, object)| object.clone())
            .collect()
    }

    /// Re-key an object under a fresh reference, leaving the old one stale
    pub fn rename_ref(&self, reference: &str) -> Option<String> {
        let mut object = self.objects.lock().unwrap().remove(reference)?;
        let new_reference = self.new_reference(type_of(reference), &object);
        object["_ref"] = serde_json::Value::String(new_reference.clone());
        self.objects.lock().unwrap().insert(new_reference.clone(), object);
        Some(new_reference)
    }

    /// Set an extensible attribute out of band
    pub fn set_ea(&self, reference: &str, name: &str, value: serde_json::Value) {
        if let Some(object) = self.objects.lock().unwrap().get_mut(reference) {
            object["extattrs"][name] = serde_json::json!({ "value": value });
        }
    }

    /// Make the next call of `operation` ("create", "update", "delete") fail
    pub fn fail_next(&self, operation: &'static str, message: impl Into<String>) {
        self.failures.lock().unwrap().insert(operation, message.into());
    }

    /// Calls made so far, as "<operation> <type or reference>"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Generate next reference
    fn new_reference(&self, object_type: &str, object: &serde_json::Value) -> String {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;

        let display = ["name", "fqdn", "network", "ipv4addr", "ipv6addr", "ptrdname"]
            .iter()
            .find_map(|field| object.get(*field).and_then(|v| v.as_str()))
            .unwrap_or("object");
        let view = ["view", "network_view"]
            .iter()
            .find_map(|field| object.get(*field).and_then(|v| v.as_str()))
            .unwrap_or("default");
        format!("{}/ZG5zLm1vY2s{}:{}/{}", object_type, current, display, view)
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(&self, operation: &'static str) -> Result<(), WapiError> {
        match self.failures.lock().unwrap().remove(operation) {
            Some(message) => Err(WapiError::Api(message)),
            None => Ok(()),
        }
    }

    fn expand_allocations(&self, body: &mut serde_json::Value) -> Result<(), WapiError> {
        for field in ALLOCATABLE_FIELDS {
            let Some(expression) = body.get(*field).and_then(|v| v.as_str()).map(str::to_string) else {
                continue;
            };
            let value = match helpers::parse_allocation(&expression)? {
                Some(Allocation::Address { cidr }) => {
                    let index = self.next_allocation(&cidr);
                    helpers::nth_address(&cidr, index)?
                }
                Some(Allocation::Network { parent, prefix_len }) => {
                    let index = self.next_allocation(&format!("{}#{}", parent, prefix_len)) - 1;
                    helpers::nth_subnet(&parent, prefix_len, index)?
                }
                None => continue,
            };
            body[*field] = serde_json::Value::String(value);
        }
        Ok(())
    }

    fn next_allocation(&self, key: &str) -> u64 {
        let mut allocations = self.allocations.lock().unwrap();
        let counter = allocations.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }
}

fn type_of(reference: &str) -> &str {
    reference.split('/').next().unwrap_or(reference)
}

#[async_trait::async_trait]
impl WapiConnector for MockConnector {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_credentials(&self) -> Result<(), WapiError> {
        Ok(())
    }

    async fn create_object(&self, object_type: &str, body: &serde_json::Value) -> Result<String, WapiError> {
        self.record_call(format!("create {}", object_type));
        self.take_failure("create")?;

        let mut object = body.clone();
        self.expand_allocations(&mut object)?;
        Ok(self.add_object(object_type, object))
    }

    async fn get_object(
        &self,
        object_type: &str,
        reference: Option<&str>,
        _return_fields: &[&str],
        query: &QueryParams,
    ) -> Result<Vec<serde_json::Value>, WapiError> {
        match reference {
            Some(reference) => {
                self.record_call(format!("get {}", reference));
                self.object(reference)
                    .map(|object| vec![object])
                    .ok_or_else(|| WapiError::NotFound(format!(
                        "AdmConDataNotFoundError: Reference {} not found",
                        reference
                    )))
            }
            None => {
                self.record_call(format!("search {}", object_type));
                Ok(self.objects_of_type(object_type)
                    .into_iter()
                    .filter(|object| helpers::matches_filters(object, query.search_fields()))
                    .collect())
            }
        }
    }

    async fn update_object(&self, reference: &str, body: &serde_json::Value) -> Result<String, WapiError> {
        self.record_call(format!("update {}", reference));
        self.take_failure("update")?;

        let mut objects = self.objects.lock().unwrap();
        let object = objects.get_mut(reference).ok_or_else(|| {
            WapiError::NotFound(format!("AdmConDataNotFoundError: Reference {} not found", reference))
        })?;
        if let (Some(target), Some(fields)) = (object.as_object_mut(), body.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(reference.to_string())
    }

    async fn delete_object(&self, reference: &str) -> Result<String, WapiError> {
        self.record_call(format!("delete {}", reference));
        self.take_failure("delete")?;

        self.objects
            .lock()
            .unwrap()
            .remove(reference)
            .map(|_| reference.to_string())
            .ok_or_else(|| WapiError::NotFound(format!(
                "AdmConDataNotFoundError: Reference {} not found",
                reference
            )))
    }
}
