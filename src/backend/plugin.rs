//! Plugin and output-sink seams of the generation pipeline.
//!
//! A [`Plugin`] turns one compiled file into a [`GeneratedUnit`]; a [`CodeSink`] receives the unit's fragments
//! and package declarations. Plugins never write to a sink themselves, so a failed file leaves no partial output.

use super::errors::GenerationError;
use super::fragment::{Fragment, GeneratedUnit};
use crate::frontend::{CompiledFile, GoImport, SymbolTable};

/// A code generator run once per compiled file.
pub trait Plugin {
    /// Name used to select the plugin (`plugins=<name>`).
    fn name(&self) -> &'static str;

    /// Generate the unit for `file`.
    ///
    /// Returns `Ok(None)` when the file has nothing for this plugin to generate.
    fn generate(&self, file: &CompiledFile, symbols: &SymbolTable) -> Result<Option<GeneratedUnit>, GenerationError>;
}

/// Append-only receiver of generated code.
pub trait CodeSink {
    /// Append one fragment.
    fn print(&mut self, fragment: &Fragment);

    /// Declare a package path the output depends on.
    fn add_import(&mut self, path: &str);

    /// Declare an import recorded by type resolution.
    fn add_named_import(&mut self, import: &GoImport) {
        self.add_import(&import.path);
    }
}
