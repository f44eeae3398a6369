//! The ordered hook chains that get a say in the cookie lifetime and final attributes before
//! anything is written. Hooks run in registration order; each one receives what the previous one
//! returned.

use crate::attributes::CookieAttributes;

/// A hook over the cookie duration, in seconds.
pub type DurationFilter = Box<dyn Fn(i64) -> i64 + Send + Sync>;

/// A hook over the merged cookie attributes.
pub type AttributesFilter = Box<dyn Fn(CookieAttributes) -> CookieAttributes + Send + Sync>;

#[derive(Default)]
pub struct Filters {
  /// Applied to the configured duration.
  duration: Vec<DurationFilter>,

  /// Applied to the defaults once caller overrides have been merged in.
  attributes: Vec<AttributesFilter>,
}

impl Filters {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a hook to the duration chain.
  pub fn on_duration<F>(mut self, filter: F) -> Self
  where
    F: Fn(i64) -> i64 + Send + Sync + 'static,
  {
    self.duration.push(Box::new(filter));
    self
  }

  /// Appends a hook to the attributes chain.
  pub fn on_attributes<F>(mut self, filter: F) -> Self
  where
    F: Fn(CookieAttributes) -> CookieAttributes + Send + Sync + 'static,
  {
    self.attributes.push(Box::new(filter));
    self
  }

  pub(crate) fn duration(&self, initial: i64) -> i64 {
    self.duration.iter().fold(initial, |duration, filter| filter(duration))
  }

  // No validation happens here; whatever the last hook returns is what gets written.
  pub(crate) fn attributes(&self, initial: CookieAttributes) -> CookieAttributes {
    self
      .attributes
      .iter()
      .fold(initial, |attributes, filter| filter(attributes))
  }
}

impl std::fmt::Debug for Filters {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    formatter
      .debug_struct("Filters")
      .field("duration", &self.duration.len())
      .field("attributes", &self.attributes.len())
      .finish()
  }
}
