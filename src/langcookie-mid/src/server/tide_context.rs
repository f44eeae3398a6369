//! Adapts a `tide` request/response pair to the `RequestContext` the cookie policy works with.

use super::shared_state;
use crate::attributes::CookieAttributes;
use crate::context::RequestContext;
use crate::header;

pub(super) struct TideContext<'a> {
  /// The inbound request, read for cookies and scheme.
  request: &'a tide::Request<shared_state::SharedState>,

  /// Used to derive `Max-Age` for queued cookies.
  now: i64,

  /// Serialized `Set-Cookie` values waiting for a response.
  pending: Vec<String>,

  /// Set once the pending headers have been handed to a response.
  sent: bool,
}

impl<'a> TideContext<'a> {
  pub(super) fn new(request: &'a tide::Request<shared_state::SharedState>, now: i64) -> Self {
    Self {
      request,
      now,
      pending: vec![],
      sent: false,
    }
  }

  /// Moves every queued cookie onto the response. Writes attempted afterwards are skipped by the
  /// policy.
  pub(super) fn apply(&mut self, response: &mut tide::Response) {
    for cookie in self.pending.drain(..) {
      match cookie.parse::<tide::http::headers::HeaderValue>() {
        Ok(value) => {
          tracing::debug!("applying cookie header '{cookie}'");
          response.append_header("Set-Cookie", value);
        }
        Err(error) => tracing::warn!("skipping unrepresentable cookie header '{cookie}' - {error}"),
      }
    }

    self.sent = true;
  }
}

impl<'a> RequestContext for TideContext<'a> {
  // The cookies middleware has already percent-decoded inbound values.
  fn cookie(&self, name: &str) -> Option<String> {
    self.request.cookie(name).map(|cookie| cookie.value().to_string())
  }

  fn is_secure(&self) -> bool {
    let forwarded = self
      .request
      .header("X-Forwarded-Proto")
      .map(|values| values.last().as_str().eq_ignore_ascii_case("https"))
      .unwrap_or(false);

    forwarded || self.request.url().scheme() == "https"
  }

  fn headers_sent(&self) -> bool {
    self.sent
  }

  fn set_cookie(&mut self, name: &str, value: &str, attributes: &CookieAttributes) {
    self.pending.push(header::serialize(name, value, attributes, self.now));
  }
}
