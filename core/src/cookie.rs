//! `Set-Cookie` header parsing.
//!
//! Parsing is delegated to the `cookie` crate; only the attributes surfaced
//! in `HttpCookie` are read. A leading dot on `Domain` is dropped, as RFC
//! 6265 requires.

use chrono::{DateTime, Utc};
use cookie::Cookie;

use crate::http::HttpCookie;

/// Parse one `Set-Cookie` header value.
///
/// Returns `None` when the header has no `name=value` pair or the name is
/// empty.
pub fn parse_set_cookie(header: &str) -> Option<HttpCookie> {
    let parsed = Cookie::parse(header).ok()?;
    Some(HttpCookie {
        name: parsed.name().to_string(),
        value: parsed.value_trimmed().to_string(),
        domain: parsed.domain().unwrap_or_default().to_string(),
        path: parsed.path().unwrap_or_default().to_string(),
        expires: parsed
            .expires_datetime()
            .and_then(|at| DateTime::<Utc>::from_timestamp(at.unix_timestamp(), at.nanosecond())),
        secure: parsed.secure().unwrap_or(false),
        http_only: parsed.http_only().unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_name_and_value_only() {
        let cookie = parse_set_cookie("sid=abc123").unwrap();
        assert_eq!(cookie.name, "sid");
        assert_eq!(cookie.value, "abc123");
        assert!(cookie.domain.is_empty());
        assert!(cookie.expires.is_none());
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
    }

    #[test]
    fn parses_all_attributes() {
        let cookie = parse_set_cookie(
            "sid=abc; Domain=example.com; Path=/api; \
             Expires=Wed, 21 Oct 2015 07:28:00 GMT; Secure; HttpOnly",
        )
        .unwrap();
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/api");
        assert_eq!(
            cookie.expires,
            Some(Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap())
        );
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let cookie = parse_set_cookie("a=b; path=/x; SECURE; httponly").unwrap();
        assert_eq!(cookie.path, "/x");
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn legacy_expires_format() {
        let cookie = parse_set_cookie("a=b; expires=Thu, 01-Jan-2026 00:00:00 GMT").unwrap();
        assert_eq!(
            cookie.expires,
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bad_expires_is_ignored() {
        let cookie = parse_set_cookie("a=b; Expires=tomorrow").unwrap();
        assert!(cookie.expires.is_none());
    }

    #[test]
    fn leading_dot_is_dropped_from_domain() {
        let cookie = parse_set_cookie("a=b; Domain=.example.com").unwrap();
        assert_eq!(cookie.domain, "example.com");
    }

    #[test]
    fn quoted_value_is_unquoted() {
        let cookie = parse_set_cookie(r#"token="xyz"; Path=/"#).unwrap();
        assert_eq!(cookie.value, "xyz");
    }

    #[test]
    fn value_may_contain_equals() {
        let cookie = parse_set_cookie("data=a=b=c").unwrap();
        assert_eq!(cookie.value, "a=b=c");
    }

    #[test]
    fn missing_pair_is_rejected() {
        assert!(parse_set_cookie("garbage").is_none());
        assert!(parse_set_cookie("=value").is_none());
        assert!(parse_set_cookie("").is_none());
    }
}
