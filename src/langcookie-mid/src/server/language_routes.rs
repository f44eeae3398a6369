use super::{shared_state, tide_context};
use crate::attributes::{CookieOverrides, SameSite};
use crate::sanitize::sanitize_key;
use serde::{Deserialize, Serialize};

/// The json-serializable response structure for our language endpoints.
#[derive(Debug, Serialize)]
struct LanguageResponse {
  /// The language held by the cookie, empty when there is none.
  language: String,
}

/// The payload accepted when a client picks a language.
#[derive(Debug, Deserialize)]
struct LanguageSelection {
  /// The requested language slug. Sanitized before anything else happens to it.
  language: Option<String>,

  /// Optional cross-site policy override for this write.
  same_site: Option<SameSite>,

  /// Optional lifetime override in seconds; zero asks for a session cookie.
  duration: Option<i64>,
}

/// route: returns the language currently stored in the cookie.
pub(super) async fn current(request: tide::Request<shared_state::SharedState>) -> tide::Result {
  let state = request.state();
  let context = tide_context::TideContext::new(&request, state.policy.now());
  let language = state.policy.get(&context);

  tracing::info!("current language cookie - '{language}'");
  tide::Body::from_json(&LanguageResponse { language }).map(|body| tide::Response::builder(200).body(body).build())
}

/// route: stores the selected language in the cookie, provided it is one we serve.
pub(super) async fn select(mut request: tide::Request<shared_state::SharedState>) -> tide::Result {
  let selection = request.body_json::<LanguageSelection>().await.map_err(|error| {
    tracing::warn!("unable to parse language selection - {error}");
    tide::Error::from_str(422, "invalid-payload")
  })?;

  let language = selection
    .language
    .as_deref()
    .map(sanitize_key)
    .filter(|language| !language.is_empty())
    .ok_or_else(|| {
      tracing::warn!("language selection without a usable language - {selection:?}");
      tide::Error::from_str(422, "missing-language")
    })?;

  let state = request.state();

  if !state.config.allows(&language) {
    tracing::warn!("refusing to store unsupported language '{language}'");
    return Err(tide::Error::from_str(422, "invalid-language"));
  }

  let now = state.policy.now();
  let mut overrides = CookieOverrides::default();

  if let Some(same_site) = selection.same_site {
    overrides = overrides.same_site(same_site);
  }

  if let Some(duration) = selection.duration {
    let expires = match duration {
      0 => 0,
      _ => now.checked_add(duration).ok_or_else(|| {
        tracing::warn!("refusing out of range cookie duration {duration}");
        tide::Error::from_str(422, "invalid-duration")
      })?,
    };
    overrides = overrides.expires(expires);
  }

  let mut context = tide_context::TideContext::new(&request, now);
  state.policy.set(&mut context, &language, overrides);
  tracing::info!("language selected - '{language}'");

  let body = tide::Body::from_json(&LanguageResponse { language })?;
  let mut response = tide::Response::builder(200).body(body).build();
  context.apply(&mut response);
  Ok(response)
}

/// route: drops the language cookie.
pub(super) async fn clear(request: tide::Request<shared_state::SharedState>) -> tide::Result {
  let state = request.state();
  let mut context = tide_context::TideContext::new(&request, state.policy.now());
  state.policy.clear(&mut context, CookieOverrides::default());

  let mut response = tide::Response::new(204);
  context.apply(&mut response);
  Ok(response)
}
