//! rpcxgen backend
//!
//! This module turns compiled descriptors into Go source.
//!
//! The pipeline is:
//! 1. `Generator` selects a plugin and builds the symbol table
//! 2. The plugin resolves method types and emits typed fragments into a `GeneratedUnit`
//! 3. The unit is written to a `GoFile` sink, which renders the final source
//!
//! ## Module Organization
//!
//! - `plugin.rs` - `Plugin` and `CodeSink` traits
//! - `fragment.rs` - records, fragments and generated units
//! - `rpcx/` - the rpcx stub plugin and its per-family emitters
//! - `generator.rs` - plugin registry and Go file assembly
//! - `go_emitter.rs` - low-level Go code string builder
//! - `errors.rs` - generation errors

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod fragment;
pub mod generator;
pub mod go_emitter;
pub mod plugin;
pub mod rpcx;

pub use errors::{GenerationError, TypePosition};
pub use fragment::{Fragment, FragmentRole, GeneratedUnit, MethodRecord, ServiceRecord};
pub use generator::{GeneratedFile, Generator, GoFile};
pub use plugin::{CodeSink, Plugin};
pub use rpcx::RpcxPlugin;
