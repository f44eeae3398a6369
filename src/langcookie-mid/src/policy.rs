//! The language cookie itself: how its attributes are resolved, when it is (not) written and how
//! it is read back.

use crate::attributes::{CookieAttributes, CookieOverrides, SameSite};
use crate::constants;
use crate::context::{Clock, RequestContext, SystemClock};
use crate::filters::Filters;
use crate::sanitize::sanitize_key;
use serde::Deserialize;

fn default_name() -> Option<String> {
  Some(constants::DEFAULT_COOKIE_NAME.to_string())
}

fn default_path() -> String {
  constants::DEFAULT_COOKIE_PATH.to_string()
}

fn default_duration() -> i64 {
  constants::YEAR_IN_SECONDS
}

/// Site-wide cookie settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
  /// The name of the cookie. Unset (or empty) disables every write.
  #[serde(default = "default_name")]
  pub name: Option<String>,

  /// The path the cookie is scoped to unless overridden.
  #[serde(default = "default_path")]
  pub path: String,

  /// The domain the cookie is bound to. Leave unset for `localhost`.
  #[serde(default)]
  pub domain: Option<String>,

  /// Lifetime in seconds handed to the duration filters. Zero means a session cookie.
  #[serde(default = "default_duration")]
  pub duration: i64,
}

impl Default for Configuration {
  fn default() -> Self {
    Self {
      name: default_name(),
      path: default_path(),
      domain: None,
      duration: default_duration(),
    }
  }
}

pub struct CookiePolicy {
  config: Configuration,
  filters: Filters,
  clock: Box<dyn Clock>,
}

impl std::fmt::Debug for CookiePolicy {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    formatter
      .debug_struct("CookiePolicy")
      .field("config", &self.config)
      .field("filters", &self.filters)
      .finish()
  }
}

impl CookiePolicy {
  pub fn new(config: Configuration) -> Self {
    Self {
      config,
      filters: Filters::default(),
      clock: Box::new(SystemClock),
    }
  }

  pub fn with_filters(mut self, filters: Filters) -> Self {
    self.filters = filters;
    self
  }

  pub fn with_clock<C>(mut self, clock: C) -> Self
  where
    C: Clock + 'static,
  {
    self.clock = Box::new(clock);
    self
  }

  /// The current time according to this policy's clock.
  pub fn now(&self) -> i64 {
    self.clock.now()
  }

  /// The configured cookie name, or `None` when the cookie is disabled.
  pub fn name(&self) -> Option<&str> {
    self.config.name.as_deref().filter(|name| !name.is_empty())
  }

  /// Computes the attributes a write would use: configured defaults, then caller overrides, then
  /// the attribute filters.
  pub fn resolve_attributes<R>(&self, context: &R, overrides: CookieOverrides) -> CookieAttributes
  where
    R: RequestContext + ?Sized,
  {
    let now = self.clock.now();
    let duration = self.filters.duration(self.config.duration);
    let expires = if duration != 0 { now.saturating_add(duration) } else { 0 };

    let defaults = CookieAttributes {
      expires,
      path: self.config.path.clone(),
      domain: self.config.domain.clone(),
      secure: context.is_secure(),
      http_only: false,
      same_site: SameSite::Lax,
    };

    let attributes = self.filters.attributes(overrides.apply(defaults));
    tracing::debug!("resolved cookie attributes {attributes:?}");
    attributes
  }

  /// Writes `value` into the cookie unless the headers are gone, the cookie is disabled or the
  /// client already holds this exact value.
  pub fn set<R>(&self, context: &mut R, value: &str, overrides: CookieOverrides)
  where
    R: RequestContext + ?Sized,
  {
    let name = match self.writable_name(context) {
      Some(name) => name,
      None => return,
    };

    if self.get(context) == value {
      tracing::debug!("cookie '{name}' already holds '{value}', skipping write");
      return;
    }

    let attributes = self.resolve_attributes(context, overrides);
    tracing::debug!("writing cookie '{name}' = '{value}'");
    context.set_cookie(name, value, &attributes);
  }

  /// Returns the sanitized value of the cookie, or an empty string when there is none.
  pub fn get<R>(&self, context: &R) -> String
  where
    R: RequestContext + ?Sized,
  {
    self
      .name()
      .and_then(|name| context.cookie(name))
      .map(sanitize_key)
      .unwrap_or_default()
  }

  /// Asks the client to drop the cookie. Does nothing when there is no cookie to drop.
  pub fn clear<R>(&self, context: &mut R, overrides: CookieOverrides)
  where
    R: RequestContext + ?Sized,
  {
    let name = match self.writable_name(context) {
      Some(name) => name,
      None => return,
    };

    if context.cookie(name).is_none() {
      tracing::debug!("no '{name}' cookie present, nothing to clear");
      return;
    }

    // Forced after the filters so that none of them can keep the cookie alive.
    let mut attributes = self.resolve_attributes(context, overrides);
    attributes.expires = self.clock.now().saturating_sub(constants::YEAR_IN_SECONDS);
    tracing::debug!("clearing cookie '{name}'");
    context.set_cookie(name, "", &attributes);
  }

  fn writable_name<R>(&self, context: &R) -> Option<&str>
  where
    R: RequestContext + ?Sized,
  {
    if context.headers_sent() {
      tracing::debug!("headers already sent, skipping cookie write");
      return None;
    }

    let name = self.name();

    if name.is_none() {
      tracing::debug!("language cookie disabled, skipping cookie write");
    }

    name
  }
}
