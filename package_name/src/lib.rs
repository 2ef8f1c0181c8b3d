//! Service skeleton shipped with the template.
//!
//! After setup this crate carries the derived project's name. It exposes a
//! small HTTP router with a health check; grow it from here.

pub mod app;
pub mod util;

/// Package name baked in at compile time.
pub const PROJECT: &str = env!("CARGO_PKG_NAME");
/// Package version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
