//! Infoblox WAPI REST Client
//!
//! A Rust client library for the Infoblox Web API (WAPI).
//! Provides type-safe models, a connector abstraction over the REST surface,
//! and an object manager with typed DNS, IPAM and DTC operations.
//!
//! # Example
//!
//! ```no_run
//! use ibclient::{HostConfig, ObjectManager, TransportConfig, WapiClient, ARecord};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = HostConfig {
//!     host: "gridmaster.example.com".to_string(),
//!     version: "2.7".to_string(),
//!     port: "443".to_string(),
//!     username: "admin".to_string(),
//!     password: "infoblox".to_string(),
//! };
//! let client = WapiClient::new(host, TransportConfig::default())?;
//!
//! // Create an A record through the object manager
//! let manager = ObjectManager::new(&client, "Terraform", None);
//! let record = ARecord::new("www.example.com", "10.0.0.10", "default");
//! let created = manager.create_a_record(record).await?;
//! println!("created {:?}", created.reference);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Connector**: `create/get/update/delete` object primitives with query filtering
//! - **Object manager**: typed operations, tenant stamping, name lookups
//! - **Extensible attributes**: wire-format aware `Ea` map
//! - **Mocking**: in-memory `MockConnector` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
pub mod object_manager;
#[path = "trait.rs"]
pub mod connector_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{HostConfig, TransportConfig, WapiClient};
pub use common::HttpClient;
pub use common::query::QueryParams;
pub use connector_trait::WapiConnector;
pub use error::WapiError;
pub use models::*;
pub use object_manager::{EA_CMP_TYPE, EA_TENANT_ID, ObjectManager, next_available_ip, next_available_network};
#[cfg(feature = "test-util")]
pub use mock::MockConnector;
