use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Configuration {
  /// The address to bind our tcp stream to.
  pub(super) addr: String,

  /// Name, scope and lifetime of the language cookie.
  #[serde(default)]
  pub(super) cookie: crate::policy::Configuration,

  /// The language slugs clients may select. When empty, any sanitized slug is accepted.
  #[serde(default)]
  pub(super) languages: Vec<String>,
}

impl Configuration {
  /// The cookie portion of the configuration, used to build the policy shared by every request.
  pub fn cookie(&self) -> &crate::policy::Configuration {
    &self.cookie
  }

  /// Whether a (sanitized) language slug may be stored in the cookie.
  pub(super) fn allows(&self, language: &str) -> bool {
    self.languages.is_empty() || self.languages.iter().any(|allowed| allowed == language)
  }
}
