/// The name used for the language cookie when the configuration does not provide one.
pub const DEFAULT_COOKIE_NAME: &str = "site_language";

/// The path the cookie is scoped to when the configuration does not provide one.
pub const DEFAULT_COOKIE_PATH: &str = "/";

/// The default lifetime of the cookie, before any duration filter has been applied.
pub const YEAR_IN_SECONDS: i64 = 365 * 24 * 60 * 60;
