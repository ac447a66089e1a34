//! crates/invoicer_core/src/ids.rs
//!
//! Identifier and timestamp generation for the persisted entities.
//!
//! Ids are opaque prefixed strings. The random part is a UUIDv4 rather
//! than a timestamp-plus-random suffix, so uniqueness holds without a
//! collision check while the wire shape stays an opaque string.

use chrono::{Local, SecondsFormat, Utc};
use uuid::Uuid;

pub const CLIENT_PREFIX: &str = "client";
pub const INVOICE_PREFIX: &str = "invoice";
pub const LINE_ITEM_PREFIX: &str = "item";

/// Generates a fresh `{prefix}_{uuid}` identifier.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Current instant as an RFC 3339 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's date as an ISO-8601 date string in local time.
pub fn today() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_are_unique() {
        let a = new_id(CLIENT_PREFIX);
        let b = new_id(CLIENT_PREFIX);
        assert!(a.starts_with("client_"));
        assert_ne!(a, b);
    }

    #[test]
    fn today_is_iso_date() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert!(d.chars().nth(4) == Some('-') && d.chars().nth(7) == Some('-'));
    }
}
