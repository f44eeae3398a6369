//! The seams between the cookie policy and whatever is handling the current request.

use crate::attributes::CookieAttributes;
use std::collections::HashMap;

/// Everything the policy needs to know about (and do to) the request currently being handled.
pub trait RequestContext {
  /// The raw value of an inbound cookie, if the client sent one.
  fn cookie(&self, name: &str) -> Option<String>;

  /// Whether the current request arrived over https.
  fn is_secure(&self) -> bool;

  /// Once true, any further cookie write would be lost.
  fn headers_sent(&self) -> bool;

  /// Queues a `Set-Cookie` for the outgoing response.
  fn set_cookie(&mut self, name: &str, value: &str, attributes: &CookieAttributes);
}

/// The source of "now", in epoch seconds.
pub trait Clock: Send + Sync {
  fn now(&self) -> i64;
}

/// Reads the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> i64 {
    chrono::Utc::now().timestamp()
  }
}

impl<F> Clock for F
where
  F: Fn() -> i64 + Send + Sync,
{
  fn now(&self) -> i64 {
    self()
  }
}

/// A request context backed by a plain map, for testing code that drives a `CookiePolicy` without
/// an http server. Writes take effect on the map immediately, so a read that follows a write sees
/// the new value. An empty value removes the cookie. Writes are recorded unserialized.
#[derive(Debug, Default, Clone)]
pub struct MemoryContext {
  cookies: HashMap<String, String>,

  /// Every write issued through this context, in order.
  pub writes: Vec<(String, String, CookieAttributes)>,

  pub secure: bool,

  pub headers_sent: bool,
}

impl MemoryContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds an inbound cookie.
  pub fn with_cookie<N, V>(mut self, name: N, value: V) -> Self
  where
    N: Into<String>,
    V: Into<String>,
  {
    self.cookies.insert(name.into(), value.into());
    self
  }
}

impl RequestContext for MemoryContext {
  fn cookie(&self, name: &str) -> Option<String> {
    self.cookies.get(name).cloned()
  }

  fn is_secure(&self) -> bool {
    self.secure
  }

  fn headers_sent(&self) -> bool {
    self.headers_sent
  }

  fn set_cookie(&mut self, name: &str, value: &str, attributes: &CookieAttributes) {
    if value.is_empty() {
      self.cookies.remove(name);
    } else {
      self.cookies.insert(name.to_string(), value.to_string());
    }

    self
      .writes
      .push((name.to_string(), value.to_string(), attributes.clone()));
  }
}
