//! Attribute validators shared by the resource handlers

use crate::error::{ProviderError, Result};
use crate::resource_data::ResourceData;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family of an address or CIDR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    V4,
    V6,
}

/// Exactly one of `a` and `b` must be set
pub fn exactly_one_of(d: &ResourceData, a: &str, b: &str) -> Result<()> {
    match (d.contains(a), d.contains(b)) {
        (true, true) => Err(ProviderError::validation(format!(
            "only one of '{}' and '{}' may be set",
            a, b
        ))),
        (false, false) => Err(ProviderError::validation(format!(
            "one of '{}' or '{}' must be set",
            a, b
        ))),
        _ => Ok(()),
    }
}

/// At most one of `a` and `b` may be set
pub fn conflicts_with(d: &ResourceData, a: &str, b: &str) -> Result<()> {
    if d.contains(a) && d.contains(b) {
        return Err(ProviderError::validation(format!(
            "'{}' conflicts with '{}'",
            a, b
        )));
    }
    Ok(())
}

/// Parse an IPv4 address attribute
pub fn validate_ipv4(field: &str, value: &str) -> Result<Ipv4Addr> {
    value
        .parse()
        .map_err(|_| ProviderError::validation(format!("'{}' is not a valid IPv4 address: {}", field, value)))
}

/// Parse an IPv6 address attribute
pub fn validate_ipv6(field: &str, value: &str) -> Result<Ipv6Addr> {
    value
        .parse()
        .map_err(|_| ProviderError::validation(format!("'{}' is not a valid IPv6 address: {}", field, value)))
}

/// Address family of an address attribute
pub fn ip_family(field: &str, value: &str) -> Result<IpFamily> {
    match value.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => Ok(IpFamily::V4),
        Ok(IpAddr::V6(_)) => Ok(IpFamily::V6),
        Err(_) => Err(ProviderError::validation(format!(
            "'{}' is not a valid IP address: {}",
            field, value
        ))),
    }
}

/// Parse `address/prefix` and return its family
pub fn validate_cidr(field: &str, value: &str) -> Result<IpFamily> {
    let invalid = || ProviderError::validation(format!("'{}' is not a valid CIDR: {}", field, value));

    let (address, prefix) = value.split_once('/').ok_or_else(invalid)?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    match address.parse::<IpAddr>().map_err(|_| invalid())? {
        IpAddr::V4(_) if prefix <= 32 => Ok(IpFamily::V4),
        IpAddr::V6(_) if prefix <= 128 => Ok(IpFamily::V6),
        _ => Err(invalid()),
    }
}

/// Integer attribute that must fit a 16-bit unsigned field
pub fn validate_u16(field: &str, value: i64) -> Result<u32> {
    u16::try_from(value)
        .map(u32::from)
        .map_err(|_| ProviderError::validation(format!(
            "'{}' must be between 0 and 65535, got {}",
            field, value
        )))
}

/// Host name made of non-empty labels of letters, digits, `-` and `_`
pub fn validate_hostname(field: &str, value: &str) -> Result<()> {
    let name = value.strip_suffix('.').unwrap_or(value);
    let valid = !name.is_empty()
        && name.len() <= 253
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(ProviderError::validation(format!("'{}' is not a valid host name: {}", field, value)))
    }
}

/// SRV owner name: `_service._proto.domain`
pub fn validate_srv_name(value: &str) -> Result<()> {
    let invalid = |reason: &str| {
        ProviderError::validation(format!(
            "SRV record name '{}' must look like _service._proto.domain: {}",
            value, reason
        ))
    };

    let mut labels = value.splitn(3, '.');
    let service = labels.next().unwrap_or_default();
    let proto = labels.next().ok_or_else(|| invalid("missing protocol"))?;
    let domain = labels.next().ok_or_else(|| invalid("missing domain"))?;

    if service.len() < 2 || !service.starts_with('_') {
        return Err(invalid("service label must start with '_' and be non-empty"));
    }
    if proto.len() < 2 || !proto.starts_with('_') {
        return Err(invalid("protocol label must start with '_' and be non-empty"));
    }
    validate_hostname("name", domain).map_err(|_| invalid("domain is not a valid host name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exactly_one_of() {
        let both = ResourceData::new(json!({"ip_addr": "10.0.0.1", "cidr": "10.0.0.0/24"}).as_object().cloned().unwrap());
        let neither = ResourceData::new(json!({"fqdn": "a.example.com"}).as_object().cloned().unwrap());
        let one = ResourceData::new(json!({"cidr": "10.0.0.0/24", "ip_addr": ""}).as_object().cloned().unwrap());

        assert!(exactly_one_of(&both, "ip_addr", "cidr").is_err());
        assert!(exactly_one_of(&neither, "ip_addr", "cidr").is_err());
        assert!(exactly_one_of(&one, "ip_addr", "cidr").is_ok());
        assert!(conflicts_with(&both, "ip_addr", "cidr").is_err());
        assert!(conflicts_with(&neither, "ip_addr", "cidr").is_ok());
    }

    #[test]
    fn test_addresses_and_cidrs() {
        assert!(validate_ipv4("ip_addr", "10.0.0.1").is_ok());
        assert!(validate_ipv4("ip_addr", "2001:db8::1").is_err());
        assert!(validate_ipv6("ipv6_addr", "2001:db8::1").is_ok());
        assert_eq!(ip_family("ip_addr", "2001:db8::1").unwrap(), IpFamily::V6);
        assert_eq!(validate_cidr("cidr", "10.0.0.0/24").unwrap(), IpFamily::V4);
        assert_eq!(validate_cidr("cidr", "2001:db8::/64").unwrap(), IpFamily::V6);
        assert!(validate_cidr("cidr", "10.0.0.0/33").is_err());
        assert!(validate_cidr("cidr", "10.0.0.0").is_err());
    }

    #[test]
    fn test_u16_range() {
        assert_eq!(validate_u16("port", 443).unwrap(), 443);
        assert!(validate_u16("port", 65536).is_err());
        assert!(validate_u16("priority", -1).is_err());
    }

    #[test]
    fn test_hostnames() {
        assert!(validate_hostname("target", "sip.example.com").is_ok());
        assert!(validate_hostname("target", "sip.example.com.").is_ok());
        assert!(validate_hostname("target", "bad..example.com").is_err());
        assert!(validate_hostname("target", "-bad.example.com").is_err());
        assert!(validate_hostname("target", "").is_err());
    }

    #[test]
    fn test_srv_names() {
        assert!(validate_srv_name("_sip._tcp.example.com").is_ok());
        assert!(validate_srv_name("sip._tcp.example.com").is_err());
        assert!(validate_srv_name("_._tcp.example.com").is_err());
        assert!(validate_srv_name("_sip._tcp").is_err());
        assert!(validate_srv_name("_sip._tcp..com").is_err());
    }
}
