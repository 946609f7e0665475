//! Declarative attribute schemas
//!
//! Each resource describes its attributes once; the shared CRUD code uses the
//! schema to fill defaults, check required and typed values, reject changes
//! to immutable attributes and plan an update from state plus configuration.

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use serde::Serialize;
use serde_json::{Map, Value};

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
    List,
    Map,
}

impl AttributeType {
    fn accepts(self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::List => value.is_array(),
            AttributeType::Map => value.is_object(),
        }
    }
}

/// One attribute of a resource or data source
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    pub computed: bool,
    pub immutable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: &'static str,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            computed: false,
            immutable: false,
            default: None,
            description: "",
        }
    }

    /// Attribute holding a string
    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::String)
    }

    /// Attribute holding an integer
    pub fn int(name: &'static str) -> Self {
        Self::new(name, AttributeType::Int)
    }

    /// Attribute holding a boolean
    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    /// Attribute holding a JSON array
    pub fn list(name: &'static str) -> Self {
        Self::new(name, AttributeType::List)
    }

    /// Attribute holding a JSON object
    pub fn map(name: &'static str) -> Self {
        Self::new(name, AttributeType::Map)
    }

    /// Value must be set in configuration
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value is filled in from the remote object
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Changing the value after create is rejected
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Value used when configuration leaves the attribute unset
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Human-readable description shown by the `schema` command
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Attribute set of a resource or data source
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Schema over exactly these attributes
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Extend with the attributes every managed object carries
    pub fn with_managed_attributes(mut self, supports_ea: bool, supports_internal_id: bool) -> Self {
        if supports_ea {
            self.attributes.push(
                Attribute::string("ext_attrs")
                    .default_value("{}")
                    .describe("Extensible attributes of the object, as a JSON object string"),
            );
        }
        if supports_internal_id {
            self.attributes.push(
                Attribute::string("internal_id")
                    .computed()
                    .describe("Client-generated identifier stored as the 'Terraform Internal ID' attribute"),
            );
        }
        self.attributes.push(
            Attribute::string("ref")
                .computed()
                .describe("WAPI reference of the object"),
        );
        self
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Fill unset attributes that have a default
    pub fn apply_defaults(&self, d: &mut ResourceData) {
        for attribute in &self.attributes {
            if let Some(default) = &attribute.default {
                if !d.contains(attribute.name) {
                    d.set(attribute.name, default.clone());
                }
            }
        }
    }

    /// Check required attributes, value types and unknown keys
    pub fn validate(&self, d: &ResourceData) -> Result<()> {
        for (key, value) in d.attributes() {
            let attribute = self
                .get(key)
                .ok_or_else(|| ProviderError::validation(format!("unsupported attribute '{}'", key)))?;
            if !value.is_null() && !attribute.kind.accepts(value) {
                return Err(ProviderError::validation(format!(
                    "attribute '{}' expects a {:?} value, got {}",
                    key, attribute.kind, value
                )));
            }
        }

        for attribute in self.attributes.iter().filter(|a| a.required) {
            if !d.contains(attribute.name) {
                return Err(ProviderError::validation(format!(
                    "attribute '{}' is required",
                    attribute.name
                )));
            }
        }
        Ok(())
    }

    /// Reject updates that change an immutable attribute
    pub fn check_immutable(&self, d: &ResourceData) -> Result<()> {
        for attribute in self.attributes.iter().filter(|a| a.immutable) {
            if d.get_prior(attribute.name).is_some() && d.has_change(attribute.name) {
                return Err(ProviderError::validation(format!(
                    "changing the value of '{}' field is not allowed",
                    attribute.name
                )));
            }
        }
        Ok(())
    }

    /// Planned attributes for an update
    ///
    /// Configured values win; computed attributes missing from the
    /// configuration keep their recorded value.
    pub fn plan(&self, prior: &Map<String, Value>, config: &Map<String, Value>) -> Map<String, Value> {
        let mut planned = Map::new();
        for attribute in &self.attributes {
            let value = config
                .get(attribute.name)
                .filter(|v| !v.is_null())
                .or_else(|| attribute.computed.then(|| prior.get(attribute.name)).flatten())
                .or(attribute.default.as_ref());
            if let Some(value) = value {
                planned.insert(attribute.name.to_string(), value.clone());
            }
        }
        planned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(vec![
            Attribute::string("fqdn").required(),
            Attribute::string("dns_view").immutable().default_value("default"),
            Attribute::string("ip_addr").computed(),
            Attribute::int("ttl").default_value(-1),
            Attribute::string("comment").default_value(""),
        ])
        .with_managed_attributes(true, true)
    }

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_and_required() {
        let schema = schema();
        let mut d = ResourceData::new(attrs(json!({"ip_addr": "10.0.0.1"})));
        schema.apply_defaults(&mut d);
        assert_eq!(d.get_str("dns_view"), Some("default"));
        assert_eq!(d.get_i64("ttl"), Some(-1));

        let err = schema.validate(&d).unwrap_err();
        assert!(err.to_string().contains("'fqdn' is required"));
    }

    #[test]
    fn test_type_and_unknown_attribute_errors() {
        let schema = schema();
        let d = ResourceData::new(attrs(json!({"fqdn": "a.example.com", "ttl": "300"})));
        assert!(schema.validate(&d).unwrap_err().to_string().contains("'ttl'"));

        let d = ResourceData::new(attrs(json!({"fqdn": "a.example.com", "bogus": 1})));
        assert!(schema.validate(&d).unwrap_err().to_string().contains("unsupported attribute 'bogus'"));
    }

    #[test]
    fn test_immutable_change_is_rejected() {
        let schema = schema();
        let d = ResourceData::with_prior(
            "record:a/ZG5z:a/default",
            attrs(json!({"fqdn": "a.example.com", "dns_view": "default"})),
            attrs(json!({"fqdn": "a.example.com", "dns_view": "internal"})),
        );
        let err = schema.check_immutable(&d).unwrap_err();
        assert!(err.to_string().contains("'dns_view'"));
    }

    #[test]
    fn test_plan_keeps_computed_values() {
        let schema = schema();
        let prior = attrs(json!({
            "fqdn": "a.example.com",
            "ip_addr": "10.0.0.7",
            "comment": "old",
            "ref": "record:a/ZG5z:a/default",
            "internal_id": "1f0c5a52-7d4e-4c1b-9d2a-3c1e8f6b7a90"
        }));
        let config = attrs(json!({"fqdn": "a.example.com"}));

        let planned = schema.plan(&prior, &config);
        assert_eq!(planned["ip_addr"], "10.0.0.7");
        assert_eq!(planned["internal_id"], "1f0c5a52-7d4e-4c1b-9d2a-3c1e8f6b7a90");
        assert_eq!(planned["comment"], "");
        assert_eq!(planned["ttl"], -1);
        assert_eq!(planned["ext_attrs"], "{}");
    }
}
