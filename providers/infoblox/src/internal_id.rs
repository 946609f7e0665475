//! Internal resource IDs and reference resolution
//!
//! WAPI references change when an object is renamed or moved out of band.
//! Every object created here is tagged with a client-generated UUID in the
//! `Terraform Internal ID` attribute, so a stale reference can be recovered
//! by searching on that attribute.

use crate::ea::EA_INTERNAL_ID;
use crate::error::{ProviderError, Result};
use ibclient::{ObjectManager, QueryParams, WapiObject};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use uuid::Uuid;

/// Client-generated identifier of a managed object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternalResourceId(Uuid);

impl InternalResourceId {
    /// Generate a fresh random ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for InternalResourceId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ProviderError::validation(format!("invalid internal ID '{}': {}", s, e)))
    }
}

impl fmt::Display for InternalResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Find an object by reference, falling back to its internal ID
///
/// # Returns
/// * `Ok(T)` - The object, found by `reference` or by the internal ID attribute
/// * `Err(ProviderError::NotFound)` - Neither lookup found the object
/// * `Err(_)` - Any other client error
pub async fn search_object_by_ref_or_internal_id<T: WapiObject>(
    manager: &ObjectManager<'_>,
    reference: Option<&str>,
    internal_id: Option<&InternalResourceId>,
) -> Result<T> {
    if let Some(reference) = reference.filter(|r| !r.is_empty()) {
        match manager.get_by_ref::<T>(reference).await {
            Ok(object) => return Ok(object),
            Err(e) if e.is_not_found() => {
                warn!("{} reference {} is stale, searching by internal ID", T::OBJECT_TYPE, reference);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let Some(internal_id) = internal_id else {
        return Err(ProviderError::NotFound(format!(
            "{} {} (no internal ID to search by)",
            T::OBJECT_TYPE,
            reference.unwrap_or_default()
        )));
    };

    debug!("Searching {} by internal ID {}", T::OBJECT_TYPE, internal_id);
    let query = QueryParams::default().with_ea(EA_INTERNAL_ID, internal_id.to_string());
    manager
        .search_one::<T>(&query)
        .await?
        .ok_or_else(|| ProviderError::NotFound(format!(
            "{} with internal ID {}",
            T::OBJECT_TYPE,
            internal_id
        )))
}
