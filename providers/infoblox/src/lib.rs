//! Infoblox Provider
//!
//! Declarative create/read/update/delete/import of Infoblox DNS, IPAM and
//! DTC objects over WAPI:
//! - DNS records: A, AAAA, CNAME, MX, NS, PTR, SRV, TXT
//! - Authoritative zones
//! - IPv4/IPv6 networks and network views
//! - DTC servers, pools and load-balanced domain names
//!
//! Every managed object is tagged with a client-generated internal ID stored
//! as an extensible attribute, so it can be found again after its WAPI
//! reference changes. Extensible attributes set outside the provider are
//! preserved on update.

pub mod config;
pub mod data_sources;
pub mod ea;
pub mod error;
pub mod internal_id;
pub mod provider;
pub mod resource_data;
pub mod resources;
pub mod schema;
pub mod ttl;
pub mod validation;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use provider::{Provider, ResourceOperation};
pub use resource_data::{ResourceData, ResourceState};

/// Cloud management platform type stamped on created objects
pub const CMP_TYPE: &str = "Terraform";

/// DNS view used when none is configured
pub const DEFAULT_DNS_VIEW: &str = "default";

/// Network view used when none is configured
pub const DEFAULT_NET_VIEW: &str = "default";
