//! TTL attribute handling
//!
//! The `ttl` attribute uses `-1` for "inherit from the zone". WAPI expresses
//! the same thing with `use_ttl = false`, so the sentinel is never sent as a
//! real TTL.

use crate::error::{ProviderError, Result};

/// Sentinel for an unset TTL
pub const TTL_UNDEF: i64 = -1;

/// WAPI `(ttl, use_ttl)` for a `ttl` attribute value
pub fn ttl_to_wapi(ttl: i64) -> Result<(Option<u32>, bool)> {
    match ttl {
        TTL_UNDEF => Ok((None, false)),
        t if t < TTL_UNDEF => Err(ProviderError::validation(format!(
            "TTL value must be 0 or higher, or -1 to inherit; got {}",
            t
        ))),
        t => u32::try_from(t)
            .map(|t| (Some(t), true))
            .map_err(|_| ProviderError::validation(format!("TTL value {} is out of range", t))),
    }
}

/// `ttl` attribute value for a WAPI `(ttl, use_ttl)` pair
pub fn ttl_from_wapi(ttl: Option<u32>, use_ttl: bool) -> i64 {
    match (use_ttl, ttl) {
        (true, Some(t)) => i64::from(t),
        _ => TTL_UNDEF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_never_sent() {
        assert_eq!(ttl_to_wapi(TTL_UNDEF).unwrap(), (None, false));
        assert_eq!(ttl_to_wapi(0).unwrap(), (Some(0), true));
        assert_eq!(ttl_to_wapi(3600).unwrap(), (Some(3600), true));
    }

    #[test]
    fn test_below_sentinel_is_a_validation_error() {
        assert!(matches!(ttl_to_wapi(-2), Err(ProviderError::Validation(_))));
        assert!(matches!(ttl_to_wapi(i64::MIN), Err(ProviderError::Validation(_))));
        assert!(matches!(ttl_to_wapi(i64::from(u32::MAX) + 1), Err(ProviderError::Validation(_))));
    }

    #[test]
    fn test_read_back() {
        assert_eq!(ttl_from_wapi(Some(300), true), 300);
        assert_eq!(ttl_from_wapi(Some(300), false), TTL_UNDEF);
        assert_eq!(ttl_from_wapi(None, false), TTL_UNDEF);
    }
}
