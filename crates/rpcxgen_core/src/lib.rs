//! Provide the naming rules and well-known identifiers shared by the rpcxgen emitters.
//!
//! This crate is intentionally small and dependency-free. It holds the deterministic pieces that every emission
//! site must agree on:
//! - the exported-name transform applied to raw service and method names, and
//! - the canonical vocabulary of generated identifiers and required Go packages.
//!
//! ## Notes
//!
//! - No IO, no global state and no descriptor types live here.
//! - Every generated identifier is derived through [`conventions`] so two fragments naming the same service can
//!   never disagree on spelling.

pub mod conventions;
pub mod naming;

pub use naming::exported_name;
