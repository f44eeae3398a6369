//! The `tide` http service exposing the language cookie to browsers.

use crate::policy::CookiePolicy;
use serde::Serialize;
use std::io;
use std::sync::Arc;

/// Contains configuration structure.
mod configuration;

/// The routes reading and writing the language cookie.
mod language_routes;

/// The shared "request runtime" types.
mod shared_state;

/// The `RequestContext` implementation for tide requests.
mod tide_context;

pub use configuration::Configuration;
pub use shared_state::SharedState;

/// The schema of our basic, heartbeat message.
#[derive(Serialize)]
struct Heartbeat {
  /// The current time of our server.
  time: chrono::DateTime<chrono::Utc>,
}

/// route: returns the system time. can be used as a health check endpoint.
async fn heartbeat(request: tide::Request<shared_state::SharedState>) -> tide::Result {
  let shared_state::SharedState {
    span,
    config: _,
    policy: _,
  } = request.state();
  let span = tracing::span!(parent: span, tracing::Level::INFO, "heartbeat");
  tracing::event!(parent: &span, tracing::Level::INFO, "returning basic status info");
  tide::Body::from_json(&Heartbeat {
    time: chrono::Utc::now(),
  })
  .map(|body| tide::Response::builder(200).body(body).build())
}

/// Creates the tide application, with every route registered, around a cookie policy.
pub fn app(config: Configuration, policy: CookiePolicy) -> tide::Server<shared_state::SharedState> {
  let span = tracing::span!(tracing::Level::INFO, "http/web");

  let mut app = tide::with_state(shared_state::SharedState {
    config,
    policy: Arc::new(policy),
    span,
  });
  app.at("/status").get(heartbeat);
  app
    .at("/language")
    .get(language_routes::current)
    .post(language_routes::select)
    .delete(language_routes::clear);

  app
}

/// Binds the tcp listener using a policy built straight from the configuration.
pub async fn start(config: Configuration) -> io::Result<()> {
  let policy = CookiePolicy::new(config.cookie().clone());
  start_with(config, policy).await
}

/// Binds the tcp listener around an already-built policy, e.g. one carrying filters.
pub async fn start_with(config: Configuration, policy: CookiePolicy) -> io::Result<()> {
  let addr = config.addr.clone();
  tracing::info!("language cookie service listening on {addr}");
  app(config, policy).listen(addr).await
}

#[cfg(test)]
mod tests {
  use super::{app, Configuration};
  use crate::policy::{self, CookiePolicy};
  use tide::http::{Method, Request, Response, Url};

  const NOW: i64 = 1_445_412_480;

  fn server(languages: &[&str]) -> tide::Server<super::shared_state::SharedState> {
    server_with(policy::Configuration::default(), languages)
  }

  fn server_with(cookie: policy::Configuration, languages: &[&str]) -> tide::Server<super::shared_state::SharedState> {
    let config = Configuration {
      addr: "127.0.0.1:0".to_string(),
      cookie,
      languages: languages.iter().map(|language| language.to_string()).collect(),
    };
    let policy = CookiePolicy::new(config.cookie.clone()).with_clock(|| NOW);
    app(config, policy)
  }

  fn request(method: Method, path: &str) -> Request {
    Request::new(method, Url::parse(&format!("http://localhost{path}")).expect("valid url"))
  }

  fn selection(payload: serde_json::Value) -> Request {
    let mut request = request(Method::Post, "/language");
    request.set_body(tide::Body::from_json(&payload).expect("serializable payload"));
    request
  }

  fn set_cookie(response: &Response) -> Option<String> {
    response
      .header("Set-Cookie")
      .map(|values| values.last().as_str().to_string())
  }

  #[async_std::test]
  async fn status_responds() {
    let response: Response = server(&[]).respond(request(Method::Get, "/status")).await.expect("response");
    assert_eq!(response.status(), 200);
  }

  #[async_std::test]
  async fn current_language_is_sanitized() {
    let mut inbound = request(Method::Get, "/language");
    inbound.insert_header("Cookie", "site_language=En_US!!");

    let mut response: Response = server(&[]).respond(inbound).await.expect("response");
    let body = response.body_string().await.expect("body");

    assert_eq!(body, "{\"language\":\"en_us\"}");
  }

  #[async_std::test]
  async fn current_language_defaults_to_empty() {
    let mut response: Response = server(&[]).respond(request(Method::Get, "/language")).await.expect("response");
    let body = response.body_string().await.expect("body");

    assert_eq!(body, "{\"language\":\"\"}");
  }

  #[async_std::test]
  async fn selecting_sets_the_cookie() {
    let response: Response = server(&["fr", "de"])
      .respond(selection(serde_json::json!({ "language": "FR" })))
      .await
      .expect("response");

    assert_eq!(response.status(), 200);
    let header = set_cookie(&response).expect("set-cookie header");
    assert!(header.starts_with("site_language=fr; Expires="));
    assert!(header.contains("; Max-Age=31536000;"));
    assert!(header.ends_with("; Path=/; SameSite=Lax"));
    assert!(!header.contains("Secure"));
  }

  #[async_std::test]
  async fn selecting_the_stored_language_writes_nothing() {
    let mut inbound = selection(serde_json::json!({ "language": "fr" }));
    inbound.insert_header("Cookie", "site_language=fr");

    let response: Response = server(&[]).respond(inbound).await.expect("response");

    assert_eq!(response.status(), 200);
    assert_eq!(set_cookie(&response), None);
  }

  #[async_std::test]
  async fn forwarded_https_marks_the_cookie_secure() {
    let mut inbound = selection(serde_json::json!({ "language": "de" }));
    inbound.insert_header("X-Forwarded-Proto", "https");

    let response: Response = server(&[]).respond(inbound).await.expect("response");

    let header = set_cookie(&response).expect("set-cookie header");
    assert!(header.contains("; Secure"));
  }

  #[async_std::test]
  async fn selection_overrides_apply() {
    let payload = serde_json::json!({ "language": "de", "duration": 0, "same_site": "Strict" });
    let response: Response = server(&[]).respond(selection(payload)).await.expect("response");

    assert_eq!(
      set_cookie(&response).as_deref(),
      Some("site_language=de; Path=/; SameSite=Strict")
    );
  }

  #[async_std::test]
  async fn unsupported_language_is_refused() {
    let response: Response = server(&["fr"])
      .respond(selection(serde_json::json!({ "language": "xx" })))
      .await
      .expect("response");

    assert_eq!(response.status(), 422);
    assert_eq!(set_cookie(&response), None);
  }

  #[async_std::test]
  async fn missing_language_is_refused() {
    let response: Response = server(&[])
      .respond(selection(serde_json::json!({ "language": "!!" })))
      .await
      .expect("response");

    assert_eq!(response.status(), 422);
  }

  #[async_std::test]
  async fn clearing_expires_the_cookie() {
    let mut inbound = request(Method::Delete, "/language");
    inbound.insert_header("Cookie", "site_language=fr");

    let response: Response = server(&[]).respond(inbound).await.expect("response");

    assert_eq!(response.status(), 204);
    let header = set_cookie(&response).expect("set-cookie header");
    assert!(header.starts_with("site_language=; Expires="));
    assert!(header.contains("; Max-Age=0;"));
  }

  #[async_std::test]
  async fn encoded_inbound_cookie_is_decoded_once() {
    let mut inbound = request(Method::Get, "/language");
    inbound.insert_header("Cookie", "site_language=fr%5Fca");

    let mut response: Response = server(&[]).respond(inbound).await.expect("response");
    let body = response.body_string().await.expect("body");

    assert_eq!(body, "{\"language\":\"fr_ca\"}");
  }

  #[async_std::test]
  async fn overflowing_duration_is_refused() {
    let payload = serde_json::json!({ "language": "fr", "duration": i64::MAX });
    let response: Response = server(&[]).respond(selection(payload)).await.expect("response");

    assert_eq!(response.status(), 422);
    assert_eq!(set_cookie(&response), None);
  }

  #[async_std::test]
  async fn most_negative_duration_deletes_the_cookie() {
    let payload = serde_json::json!({ "language": "fr", "duration": i64::MIN });
    let response: Response = server(&[]).respond(selection(payload)).await.expect("response");

    assert_eq!(response.status(), 200);
    let header = set_cookie(&response).expect("set-cookie header");
    assert!(header.contains("; Max-Age=0;"));
  }

  #[async_std::test]
  async fn non_ascii_domain_skips_the_write() {
    let cookie = policy::Configuration {
      domain: Some("münchen.de".to_string()),
      ..policy::Configuration::default()
    };

    let response: Response = server_with(cookie, &[])
      .respond(selection(serde_json::json!({ "language": "fr" })))
      .await
      .expect("response");

    assert_eq!(response.status(), 200);
    assert_eq!(set_cookie(&response), None);
  }
}
