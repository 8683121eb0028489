//! maixbind version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The maixbind version string (for example, `0.1.0`).
pub const MAIXBIND_VERSION: &str = env!("CARGO_PKG_VERSION");
