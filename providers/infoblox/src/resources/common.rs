//! Shared CRUD behaviour for every resource
//!
//! A resource only describes its own attributes and how to convert between
//! `ResourceData` and its WAPI model (`ObjectHandler`). The functions here
//! implement the four-operation contract around that:
//!
//! 1. Create: validate, stamp a new internal ID, create, record the reference
//! 2. Read: resolve by reference or internal ID, flatten; not-found clears the ID
//! 3. Update: merge extensible attributes, update; roll back `d` on failure
//! 4. Delete: resolve, delete, clear the ID; not-found is success

use super::Resource;
use crate::ea::{
    EA_INTERNAL_ID, ExtAttrs, deserialize_eas, exposed_eas, merge_eas, remote_eas, serialize_eas,
    take_tenant_id,
};
use crate::error::{ProviderError, Result};
use crate::internal_id::{InternalResourceId, search_object_by_ref_or_internal_id};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};
use crate::ttl::{TTL_UNDEF, ttl_from_wapi, ttl_to_wapi};
use crate::{CMP_TYPE, DEFAULT_DNS_VIEW, DEFAULT_NET_VIEW};
use ibclient::{Ea, ObjectManager, WapiConnector, WapiError, WapiObject};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Which write a handler is expanding attributes for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

/// Conversion between `ResourceData` and one WAPI object type
#[async_trait::async_trait]
pub trait ObjectHandler: Send + Sync + 'static {
    /// WAPI model of the resource
    type Object: WapiObject;

    /// Registered type name
    const TYPE_NAME: &'static str;

    /// Whether the object carries extensible attributes
    const SUPPORTS_EA: bool = true;

    /// Whether the object is tagged with an internal ID
    const SUPPORTS_INTERNAL_ID: bool = true;

    /// Resource-specific attributes; `ext_attrs`, `internal_id` and `ref` are added
    fn attributes(&self) -> Vec<Attribute>;

    /// Cross-attribute checks beyond the schema
    fn validate(&self, _d: &ResourceData) -> Result<()> {
        Ok(())
    }

    /// Build the object to send from the planned attributes
    async fn expand(
        &self,
        manager: &ObjectManager<'_>,
        d: &ResourceData,
        ea: Ea,
        op: Operation,
    ) -> Result<Self::Object>;

    /// Write the remote object's fields into `d`
    fn flatten(&self, object: &Self::Object, d: &mut ResourceData) -> Result<()>;
}

/// Full schema of a handler's resource
pub fn schema_of<H: ObjectHandler>(handler: &H) -> Schema {
    Schema::new(handler.attributes()).with_managed_attributes(H::SUPPORTS_EA, H::SUPPORTS_INTERNAL_ID)
}

/// Adapter exposing an `ObjectHandler` as a `Resource`
#[derive(Debug, Default, Clone, Copy)]
pub struct HandlerResource<H>(pub H);

#[async_trait::async_trait]
impl<H: ObjectHandler> Resource for HandlerResource<H> {
    fn type_name(&self) -> &'static str {
        H::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        schema_of(&self.0)
    }

    async fn create(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        create_object(&self.0, connector, d).await
    }

    async fn read(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        read_object(&self.0, connector, d).await
    }

    async fn update(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        update_object(&self.0, connector, d).await
    }

    async fn delete(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        delete_object(&self.0, connector, d).await
    }

    async fn import(&self, connector: &dyn WapiConnector, d: &mut ResourceData) -> Result<()> {
        import_object(&self.0, connector, d).await
    }
}

/// User attribute set from `ext_attrs`; `None` when the attribute is absent
fn local_eas(d: &ResourceData) -> Result<Option<ExtAttrs>> {
    match d.get("ext_attrs").and_then(Value::as_str) {
        Some(text) => deserialize_eas(text).map(Some),
        None => Ok(None),
    }
}

fn internal_id_of(d: &ResourceData) -> Result<Option<InternalResourceId>> {
    d.get_str("internal_id").map(str::parse).transpose()
}

fn reference_of<T: WapiObject>(object: &T) -> Result<String> {
    object
        .reference()
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Wapi(WapiError::Api(format!("{} object has no reference", T::OBJECT_TYPE))))
}

/// Record a remote object in `d`: reference, internal ID, visible attributes, fields
pub fn apply_remote<H: ObjectHandler>(handler: &H, object: &H::Object, d: &mut ResourceData) -> Result<()> {
    let reference = reference_of(object)?;
    d.set_id(reference.as_str());
    d.set("ref", reference);

    if let Some(ea) = object.ea() {
        if H::SUPPORTS_INTERNAL_ID {
            if let Some(id) = ea.get_str(EA_INTERNAL_ID) {
                d.set("internal_id", id);
            }
        }
        if H::SUPPORTS_EA {
            let local = local_eas(d)?;
            d.set("ext_attrs", serialize_eas(&exposed_eas(ea, local.as_ref()))?);
        }
    }

    handler.flatten(object, d)
}

/// Create the remote object described by `d`
pub async fn create_object<H: ObjectHandler>(
    handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let schema = schema_of(handler);
    schema.apply_defaults(d);
    schema.validate(d)?;
    handler.validate(d)?;

    let mut tenant_id = None;
    let mut eas = ExtAttrs::new();
    if H::SUPPORTS_EA {
        let mut local = local_eas(d)?.unwrap_or_default();
        tenant_id = take_tenant_id(&mut local);
        eas = merge_eas(&ExtAttrs::new(), &local, &ExtAttrs::new(), connector).await?;
    }
    if H::SUPPORTS_INTERNAL_ID {
        let id = InternalResourceId::generate();
        eas.insert(EA_INTERNAL_ID.to_string(), Value::String(id.to_string()));
        d.set("internal_id", id.to_string());
    }

    let manager = ObjectManager::new(connector, CMP_TYPE, tenant_id);
    let object = handler.expand(&manager, d, Ea::from(eas), Operation::Create).await?;
    let created = manager.create(object).await?;
    info!("Created {} {}", H::TYPE_NAME, created.reference().unwrap_or_default());

    apply_remote(handler, &created, d)
}

/// Refresh `d` from the remote object
pub async fn read_object<H: ObjectHandler>(
    handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let manager = ObjectManager::new(connector, CMP_TYPE, None);
    let reference = d.id().to_string();
    let internal_id = internal_id_of(d)?;

    match search_object_by_ref_or_internal_id::<H::Object>(&manager, Some(&reference), internal_id.as_ref()).await {
        Ok(object) => {
            debug!("Read {} {}", H::TYPE_NAME, object.reference().unwrap_or_default());
            apply_remote(handler, &object, d)
        }
        Err(e) if e.is_not_found() => {
            warn!("{} {} no longer exists, removing it from state", H::TYPE_NAME, reference);
            d.clear_id();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Apply the planned attributes in `d` to the remote object
pub async fn update_object<H: ObjectHandler>(
    handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let schema = schema_of(handler);
    schema.apply_defaults(d);
    schema.validate(d)?;
    schema.check_immutable(d)?;
    handler.validate(d)?;

    let snapshot = d.snapshot();
    match apply_update(handler, connector, d).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            warn!("{} {} no longer exists, removing it from state", H::TYPE_NAME, snapshot.id());
            d.restore(snapshot);
            d.clear_id();
            Ok(())
        }
        Err(e) => {
            error!("Failed to update {} {}: {}", H::TYPE_NAME, snapshot.id(), e);
            d.restore(snapshot);
            Err(e)
        }
    }
}

async fn apply_update<H: ObjectHandler>(
    handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let manager = ObjectManager::new(connector, CMP_TYPE, None);
    let internal_id = internal_id_of(d)?;
    let remote = search_object_by_ref_or_internal_id::<H::Object>(&manager, Some(d.id()), internal_id.as_ref()).await?;
    let reference = reference_of(&remote)?;

    let mut ea = Ea::new();
    if H::SUPPORTS_EA {
        let (old, new) = d.get_change("ext_attrs");
        let old = deserialize_eas(old.and_then(Value::as_str).unwrap_or_default())?;
        let new = deserialize_eas(new.and_then(Value::as_str).unwrap_or_default())?;
        let current = remote.ea().map(remote_eas).unwrap_or_default();

        let mut merged = merge_eas(&current, &new, &old, connector).await?;
        if H::SUPPORTS_INTERNAL_ID && !merged.contains_key(EA_INTERNAL_ID) {
            let id = internal_id.unwrap_or_else(InternalResourceId::generate);
            warn!("{} {} has no internal ID, tagging it with {}", H::TYPE_NAME, reference, id);
            merged.insert(EA_INTERNAL_ID.to_string(), Value::String(id.to_string()));
            d.set("internal_id", id.to_string());
        }
        ea = Ea::from(merged);
    }

    let object = handler.expand(&manager, d, ea, Operation::Update).await?;
    let updated = manager.update(&reference, &object).await?;
    info!("Updated {} {}", H::TYPE_NAME, reference);

    apply_remote(handler, &updated, d)
}

/// Delete the remote object and clear the ID
pub async fn delete_object<H: ObjectHandler>(
    _handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let manager = ObjectManager::new(connector, CMP_TYPE, None);
    let internal_id = internal_id_of(d)?;

    match search_object_by_ref_or_internal_id::<H::Object>(&manager, Some(d.id()), internal_id.as_ref()).await {
        Ok(object) => {
            let reference = reference_of(&object)?;
            match manager.delete(&reference).await {
                Ok(_) => info!("Deleted {} {}", H::TYPE_NAME, reference),
                Err(e) if e.is_not_found() => warn!("{} {} was already deleted", H::TYPE_NAME, reference),
                Err(e) => return Err(e.into()),
            }
        }
        Err(e) if e.is_not_found() => {
            warn!("{} {} was already deleted", H::TYPE_NAME, d.id());
        }
        Err(e) => return Err(e),
    }

    d.clear_id();
    Ok(())
}

/// Adopt the object whose reference is the ID of `d`
///
/// An object without an internal ID is tagged with a fresh one so later
/// reads survive a reference change.
pub async fn import_object<H: ObjectHandler>(
    handler: &H,
    connector: &dyn WapiConnector,
    d: &mut ResourceData,
) -> Result<()> {
    let reference = d.id().to_string();
    if reference.is_empty() {
        return Err(ProviderError::validation(format!("{} import needs a reference", H::TYPE_NAME)));
    }

    let manager = ObjectManager::new(connector, CMP_TYPE, None);
    let mut object: H::Object = manager.get_by_ref(&reference).await.map_err(|e| {
        if e.is_not_found() {
            ProviderError::NotFound(format!("{} {}", H::TYPE_NAME, reference))
        } else {
            e.into()
        }
    })?;

    if H::SUPPORTS_INTERNAL_ID {
        let existing = object.ea().and_then(|ea| ea.get_str(EA_INTERNAL_ID)).map(str::to_string);
        match existing {
            Some(id) => {
                id.parse::<InternalResourceId>()?;
                debug!("Imported {} {} carries internal ID {}", H::TYPE_NAME, reference, id);
            }
            None => {
                let id = InternalResourceId::generate();
                if let Some(ea) = object.ea_mut() {
                    ea.insert(EA_INTERNAL_ID, id.to_string());
                }
                object = manager.update(&reference, &object).await?;
                info!("Tagged imported {} {} with internal ID {}", H::TYPE_NAME, reference, id);
            }
        }
    }

    apply_remote(handler, &object, d)
}

// Attributes shared by several resources

/// Immutable `dns_view`, defaulting to the `default` view
pub fn dns_view() -> Attribute {
    Attribute::string("dns_view")
        .immutable()
        .default_value(DEFAULT_DNS_VIEW)
        .describe("DNS view the record belongs to")
}

/// `network_view`, defaulting to the `default` view
pub fn network_view() -> Attribute {
    Attribute::string("network_view")
        .default_value(DEFAULT_NET_VIEW)
        .describe("Network view used to allocate addresses")
}

/// `ttl` in seconds with `-1` meaning unset
pub fn ttl() -> Attribute {
    Attribute::int("ttl")
        .default_value(TTL_UNDEF)
        .describe("TTL in seconds; -1 inherits the zone's TTL")
}

/// Free-text `comment`, empty by default
pub fn comment() -> Attribute {
    Attribute::string("comment")
        .default_value("")
        .describe("Description of the object")
}

/// WAPI `(ttl, use_ttl)` for the `ttl` attribute
pub fn ttl_from(d: &ResourceData) -> Result<(Option<u32>, bool)> {
    ttl_to_wapi(d.get_i64("ttl").unwrap_or(TTL_UNDEF))
}

/// Record a WAPI `(ttl, use_ttl)` pair as the `ttl` attribute
pub fn set_ttl(d: &mut ResourceData, ttl: Option<u32>, use_ttl: bool) {
    d.set("ttl", ttl_from_wapi(ttl, use_ttl));
}

/// Comment to send; always present so clearing it reaches the appliance
pub fn comment_of(d: &ResourceData) -> Option<String> {
    Some(d.get_string("comment"))
}

/// Record the remote comment; a missing one is stored as empty
pub fn set_comment(d: &mut ResourceData, comment: Option<&str>) {
    d.set("comment", comment.unwrap_or_default());
}

/// Integer attribute that must fit 16 bits
pub fn u16_attr(d: &ResourceData, field: &str) -> Result<u32> {
    let value = d
        .get_i64(field)
        .ok_or_else(|| ProviderError::validation(format!("attribute '{}' is required", field)))?;
    crate::validation::validate_u16(field, value)
}

/// Object name embedded in a reference: `dtc:server/ZG5z...:name` -> `name`
///
/// Only a trailing `/view` is dropped, so a reverse zone keeps its prefix
/// length: `zone_auth/ZG5z...:10.0.0.0/24/default` -> `10.0.0.0/24`.
pub fn ref_display_name(reference: &str) -> Option<&str> {
    let (_, rest) = reference.split_once('/')?;
    let (_, name) = rest.split_once(':')?;
    let name = name.rsplit_once('/').map_or(name, |(name, _view)| name);
    Some(name).filter(|n| !n.is_empty())
}
