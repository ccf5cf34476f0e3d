//! Cookie-string helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The anti-forgery token reaches the client only as a cookie, so both the
//! request path (token lookup) and the debug "clear cookies" action work on
//! the `name=value; name=value` form that `document.cookie` returns.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

/// Expiry date written into clearing directives.
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Iterate `(name, value)` pairs of a cookie header string.
///
/// Values are returned raw, still percent-encoded. Pairs without a name are
/// skipped.
pub fn pairs(cookies: &str) -> impl Iterator<Item = (&str, &str)> {
    cookies.split(';').filter_map(|pair| {
        let pair = pair.trim();
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = name.trim();
        (!name.is_empty()).then_some((name, value.trim()))
    })
}

/// Cookie names in header order.
pub fn names(cookies: &str) -> Vec<String> {
    pairs(cookies).map(|(name, _)| name.to_owned()).collect()
}

/// Percent-decoded value of cookie `name`, if present and non-empty.
#[must_use]
pub fn read(cookies: &str, name: &str) -> Option<String> {
    let (_, raw) = pairs(cookies).find(|(key, _)| *key == name)?;
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), std::borrow::Cow::into_owned);
    Some(decoded)
}

/// Directive that expires cookie `name` on path `/`.
#[must_use]
pub fn expired_directive(name: &str) -> String {
    format!("{name}=; Max-Age=0; expires={EPOCH_EXPIRES}; path=/")
}
