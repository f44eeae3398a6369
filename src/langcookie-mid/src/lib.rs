#![forbid(unsafe_code)]

//! This library manages the single cookie holding a visitor's chosen language: how its attributes
//! are resolved, when it is written and how it is read back.

/// Cookie attribute value types.
pub mod attributes;

/// Compile-time defaults.
pub mod constants;

/// The traits connecting the policy to a request, plus an in-memory implementation.
pub mod context;

/// The duration and attribute hook chains.
pub mod filters;

/// `Set-Cookie` header rendering.
pub mod header;

/// The cookie policy itself.
pub mod policy;

/// Restricting cookie values to a safe character set.
pub mod sanitize;

/// The `tide`-based http service.
pub mod server;
