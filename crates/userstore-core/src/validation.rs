//! Pure format predicates for user input.
//!
//! Both checks are side-effect free and never fail; they answer whether a
//! string conforms to a rule. Email addresses are intentionally not checked
//! here: the service stores them as free text.

use url::Url;

/// Returns whether `s` is a positive base-10 integer identifier.
///
/// An optional leading sign is accepted, so `"+7"` is valid while `"-1"` and
/// `"0"` are not. Values that do not fit in an `i64` are rejected, which
/// bounds identifiers to 19 significant digits.
///
/// # Example
///
/// ```
/// use userstore_core::is_valid_id;
///
/// assert!(is_valid_id("42"));
/// assert!(!is_valid_id("s1111"));
/// ```
pub fn is_valid_id(s: &str) -> bool {
    matches!(s.parse::<i64>(), Ok(value) if value >= 1)
}

/// Returns whether `s` is an absolute `http` or `https` URL with a host.
///
/// # Example
///
/// ```
/// use userstore_core::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("www.example.com"));
/// assert!(!is_valid_url("ftp://example.com"));
/// ```
pub fn is_valid_url(s: &str) -> bool {
    let Ok(url) = Url::parse(s) else {
        return false;
    };

    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
}
