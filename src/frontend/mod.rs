//! Descriptor input: the compiled file model and the symbol table it resolves against.
//!
//! ## Modules
//!
//! - `descriptor` - compiled files, services, methods and JSON loading
//! - `symbols` - symbol table and per-file resolution context

pub mod descriptor;
pub mod symbols;

pub use descriptor::{CompiledFile, DescriptorError, DescriptorSet, MethodDeclaration, ServiceDeclaration, TypeEntry};
pub use symbols::{GoImport, ResolutionContext, ResolvedType, SymbolNotFound, SymbolTable, TypeObject};
