//! Utility functions and helpers.

pub mod http;

use chrono::{FixedOffset, Utc};
use url::Url;

/// Format used for fetch timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extract the domain from a URL string.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}

/// Build a fixed UTC offset from minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Current time at the given offset, as a display string.
pub fn timestamp_now(offset: FixedOffset) -> String {
    Utc::now()
        .with_timezone(&offset)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://mashinbank.com/%D9%82"),
            Some("mashinbank.com".to_string())
        );
        assert_eq!(get_domain("not a url"), None);
    }

    #[test]
    fn test_tehran_offset() {
        let offset = offset_from_minutes(210).unwrap();
        assert_eq!(offset.local_minus_utc(), 12_600);
        assert!(offset_from_minutes(24 * 60).is_none());
    }

    #[test]
    fn test_timestamp_format() {
        let stamp = timestamp_now(offset_from_minutes(210).unwrap());
        assert!(NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
