//! Value types describing everything that is sent alongside the cookie value in a `Set-Cookie`
//! header.

use serde::{Deserialize, Serialize};
use std::io;

/// The cross-site send policy of the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum SameSite {
  /// Never sent along with cross-site requests.
  #[serde(alias = "strict")]
  Strict,

  /// Sent with top-level cross-site navigations only.
  #[default]
  #[serde(alias = "lax")]
  Lax,

  /// Always sent. Browsers require `Secure` alongside this one.
  #[serde(alias = "none")]
  None,
}

impl std::fmt::Display for SameSite {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      SameSite::Strict => write!(formatter, "Strict"),
      SameSite::Lax => write!(formatter, "Lax"),
      SameSite::None => write!(formatter, "None"),
    }
  }
}

impl std::str::FromStr for SameSite {
  type Err = io::Error;

  fn from_str(input: &str) -> io::Result<Self> {
    match input.trim().to_ascii_lowercase().as_str() {
      "strict" => Ok(SameSite::Strict),
      "lax" => Ok(SameSite::Lax),
      "none" => Ok(SameSite::None),
      _ => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid same-site policy '{input}'"),
      )),
    }
  }
}

/// The fully resolved attributes of a single cookie write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookieAttributes {
  /// Expiration as epoch seconds. Zero produces a session cookie, anything in the past asks the
  /// browser to drop the cookie.
  pub expires: i64,

  /// The path the cookie is scoped to.
  pub path: String,

  /// The domain the cookie is scoped to. `None` leaves the `Domain` attribute off entirely, which
  /// is what a `localhost` deployment needs.
  pub domain: Option<String>,

  /// Whether the cookie should only be sent over https.
  pub secure: bool,

  /// Whether the cookie should be hidden from scripts.
  pub http_only: bool,

  /// The cross-site send policy.
  pub same_site: SameSite,
}

impl CookieAttributes {
  /// True when no expiration will be sent.
  pub fn is_session(&self) -> bool {
    self.expires == 0
  }
}

/// Caller-provided attributes that win over the computed defaults. Every field left as `None`
/// keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOverrides {
  pub(crate) expires: Option<i64>,
  pub(crate) path: Option<String>,
  pub(crate) domain: Option<Option<String>>,
  pub(crate) secure: Option<bool>,
  pub(crate) http_only: Option<bool>,
  pub(crate) same_site: Option<SameSite>,
}

impl CookieOverrides {
  pub fn expires(mut self, expires: i64) -> Self {
    self.expires = Some(expires);
    self
  }

  pub fn path<S>(mut self, path: S) -> Self
  where
    S: Into<String>,
  {
    self.path = Some(path.into());
    self
  }

  pub fn domain<S>(mut self, domain: S) -> Self
  where
    S: Into<String>,
  {
    self.domain = Some(Some(domain.into()));
    self
  }

  /// Drops any configured domain for this write.
  pub fn without_domain(mut self) -> Self {
    self.domain = Some(None);
    self
  }

  pub fn secure(mut self, secure: bool) -> Self {
    self.secure = Some(secure);
    self
  }

  pub fn http_only(mut self, http_only: bool) -> Self {
    self.http_only = Some(http_only);
    self
  }

  pub fn same_site(mut self, same_site: SameSite) -> Self {
    self.same_site = Some(same_site);
    self
  }

  /// Merges these overrides on top of a set of defaults, field by field.
  pub fn apply(self, defaults: CookieAttributes) -> CookieAttributes {
    CookieAttributes {
      expires: self.expires.unwrap_or(defaults.expires),
      path: self.path.unwrap_or(defaults.path),
      domain: self.domain.unwrap_or(defaults.domain),
      secure: self.secure.unwrap_or(defaults.secure),
      http_only: self.http_only.unwrap_or(defaults.http_only),
      same_site: self.same_site.unwrap_or(defaults.same_site),
    }
  }
}
