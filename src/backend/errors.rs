//! Define error types for stub generation.
//!
//! These errors are fatal for the file being generated: the pipeline never hands a partial stub set to the
//! output sink.

use crate::frontend::SymbolNotFound;

/// Error during stub generation.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GenerationError {
    /// A method's input or output type is missing from the symbol table.
    #[error("{file}: cannot resolve {position} type of {service}.{method}")]
    #[diagnostic(
        code(rpcxgen::unresolved_type),
        help("the schema compiler must register every message type before stubs are generated")
    )]
    UnresolvedType {
        file: String,
        service: String,
        method: String,
        position: TypePosition,
        #[source]
        #[diagnostic_source]
        source: SymbolNotFound,
    },

    /// The requested plugin is not registered.
    #[error("unknown plugin `{0}`")]
    #[diagnostic(code(rpcxgen::unknown_plugin))]
    UnknownPlugin(String),
}

impl GenerationError {
    /// The unresolved type reference, if this is a resolution failure.
    pub fn missing_symbol(&self) -> Option<&str> {
        match self {
            GenerationError::UnresolvedType { source, .. } => Some(&source.type_ref),
            GenerationError::UnknownPlugin(_) => None,
        }
    }
}

/// Which side of a method signature failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    Input,
    Output,
}

impl std::fmt::Display for TypePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypePosition::Input => write!(f, "input"),
            TypePosition::Output => write!(f, "output"),
        }
    }
}
