//! DNS record resources

mod a_record;
mod aaaa_record;
mod cname_record;
mod mx_record;
mod ns_record;
mod ptr_record;
mod srv_record;
mod txt_record;

pub use a_record::ARecordHandler;
pub use aaaa_record::AaaaRecordHandler;
pub use cname_record::CnameRecordHandler;
pub use mx_record::MxRecordHandler;
pub use ns_record::NsRecordHandler;
pub use ptr_record::PtrRecordHandler;
pub use srv_record::SrvRecordHandler;
pub use txt_record::TxtRecordHandler;

use super::common::Operation;
use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use ibclient::next_available_ip;

/// Address to send for an address record
///
/// A configured `cidr` allocates the next available address on create, and
/// again on update when `cidr` changed but the address did not. Otherwise
/// the address attribute is sent as it is.
pub(crate) fn address_or_allocation(d: &ResourceData, address_field: &str, op: Operation) -> Result<String> {
    let allocate = match op {
        Operation::Create => !d.contains(address_field),
        Operation::Update => d.has_change("cidr") && !d.has_change(address_field),
    };

    if allocate {
        if let Some(cidr) = d.get_str("cidr") {
            return Ok(next_available_ip(cidr, &d.get_string("network_view")));
        }
    }

    d.get_str(address_field)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::validation(format!("one of '{}' or 'cidr' must be set", address_field)))
}
