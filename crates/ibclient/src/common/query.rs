//! Query utilities for WAPI searches
//!
//! Provides the search-field filter used by `get_object` and the encoding of
//! return fields and proxy options into a WAPI query string.

use std::collections::BTreeMap;

/// Search filter for WAPI object queries
///
/// Plain keys match object fields (`name=www.example.com`); keys prefixed with
/// `*` match extensible attributes (`*Site=HQ`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    force_proxy: bool,
    search_fields: BTreeMap<String, String>,
}

impl QueryParams {
    /// Create query params from a set of search fields
    pub fn new<K, V>(force_proxy: bool, search_fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            force_proxy,
            search_fields: search_fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add a field filter
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.search_fields.insert(key.into(), value.into());
        self
    }

    /// Add an extensible attribute filter
    pub fn with_ea(mut self, name: &str, value: impl Into<String>) -> Self {
        self.search_fields.insert(format!("*{}", name), value.into());
        self
    }

    /// Whether the search should be proxied to the grid master
    pub fn force_proxy(&self) -> bool {
        self.force_proxy
    }

    /// The search fields, in key order
    pub fn search_fields(&self) -> &BTreeMap<String, String> {
        &self.search_fields
    }

    /// True when no filters are set
    pub fn is_empty(&self) -> bool {
        self.search_fields.is_empty()
    }

    /// Encode filters, return fields and proxy option as a query string
    pub fn to_query_string(&self, return_fields: &[&str]) -> String {
        let mut parts: Vec<String> = self.search_fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        if !return_fields.is_empty() {
            let fields = return_fields
                .iter()
                .map(|f| urlencoding::encode(f).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("_return_fields%2B={}", fields));
        }

        if self.force_proxy {
            parts.push("_proxy_search=GM".to_string());
        }

        parts.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let query = QueryParams::default();
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(&[]), "");
    }

    #[test]
    fn test_fields_are_encoded_in_key_order() {
        let query = QueryParams::new(false, [("view", "default"), ("name", "www.example.com")]);
        assert_eq!(query.to_query_string(&[]), "name=www.example.com&view=default");
    }

    #[test]
    fn test_ea_filter_and_return_fields() {
        let query = QueryParams::default().with_ea("Terraform Internal ID", "abc-123");
        assert_eq!(
            query.to_query_string(&["name", "extattrs"]),
            "%2ATerraform%20Internal%20ID=abc-123&_return_fields%2B=name,extattrs"
        );
    }

    #[test]
    fn test_force_proxy() {
        let query = QueryParams::new(true, [("fqdn", "example.com")]);
        assert!(query.force_proxy());
        assert_eq!(query.to_query_string(&[]), "fqdn=example.com&_proxy_search=GM");
    }
}
