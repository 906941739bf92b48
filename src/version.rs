//! rpcxgen version information.
//!
//! The generated-file header and the CLI both read this constant so they always agree.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The rpcxgen version string (for example, `0.1.0`).
pub const RPCXGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
