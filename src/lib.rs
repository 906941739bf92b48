#![forbid(unsafe_code)]
//! rpcxgen: rpcx stub generator
//!
//! Given compiled interface definitions (services, methods and a symbol table of generated message types), this
//! crate emits Go source implementing three rpcx calling conventions per service: a server skeleton, an XClient
//! wrapper and a OneClient wrapper.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```
//! use rpcxgen::backend::Generator;
//! use rpcxgen::frontend::{CompiledFile, DescriptorSet, MethodDeclaration, ServiceDeclaration, TypeEntry};
//!
//! let mut set = DescriptorSet::default();
//! set.files.push(
//!     CompiledFile::new("helloworld.proto")
//!         .with_package("helloworld", "example.com/helloworld")
//!         .with_service(
//!             ServiceDeclaration::new("Greeter")
//!                 .with_method(MethodDeclaration::new("SayHello", "HelloRequest", "HelloReply")),
//!         ),
//! );
//! for name in ["HelloRequest", "HelloReply"] {
//!     set.types.push(TypeEntry {
//!         type_ref: name.to_string(),
//!         name: name.to_string(),
//!         package: "helloworld".to_string(),
//!         import_path: "example.com/helloworld".to_string(),
//!     });
//! }
//!
//! let files = Generator::default().generate(&set).unwrap();
//! assert_eq!(files[0].path, "helloworld.rpcx.go");
//! assert!(files[0].content.contains("func ServeForGreeter(addr string) error {"));
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod version;

pub use backend::{GeneratedFile, Generator, Plugin, RpcxPlugin};
pub use config::GeneratorConfig;
pub use frontend::{DescriptorSet, SymbolTable};
