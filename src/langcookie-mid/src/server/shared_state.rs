//! This module contains the main type that is shared across request tasks.

use crate::policy::CookiePolicy;
use std::sync::Arc;

#[derive(Clone)]
pub struct SharedState {
  pub(super) config: super::configuration::Configuration,

  pub(super) policy: Arc<CookiePolicy>,

  pub(super) span: tracing::Span,
}
