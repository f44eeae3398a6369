//! Rendering of a single `Set-Cookie` header value.

use crate::attributes::CookieAttributes;

/// The IMF-fixdate layout browsers expect in `Expires`.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Builds the `Set-Cookie` header value for a cookie. The name and value are percent-encoded so
/// neither can smuggle in attributes of its own. `now` is only used to derive `Max-Age`; an
/// expiration in the past always renders as `Max-Age=0`.
pub fn serialize(name: &str, value: &str, attributes: &CookieAttributes, now: i64) -> String {
  let mut header = tide::http::cookies::Cookie::new(name, value).encoded().to_string();

  if !attributes.is_session() {
    let expires = chrono::DateTime::<chrono::Utc>::from_timestamp(attributes.expires.max(0), 0)
      .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC);
    let max_age = attributes.expires.saturating_sub(now).max(0);
    header.push_str(&format!("; Expires={}; Max-Age={max_age}", expires.format(EXPIRES_FORMAT)));
  }

  if !attributes.path.is_empty() {
    header.push_str(&format!("; Path={}", attributes.path));
  }

  if let Some(domain) = attributes.domain.as_ref().filter(|domain| !domain.is_empty()) {
    header.push_str(&format!("; Domain={domain}"));
  }

  if attributes.secure {
    header.push_str("; Secure");
  }

  if attributes.http_only {
    header.push_str("; HttpOnly");
  }

  header.push_str(&format!("; SameSite={}", attributes.same_site));
  header
}
