//! Structured inputs and outputs of the stub emitters.
//!
//! Emission functions take [`ServiceRecord`]/[`MethodRecord`] values whose names are already exported and whose
//! types are already resolved, and return a [`Fragment`]. Nothing here touches the symbol table.

use std::collections::BTreeSet;

use rpcxgen_core::exported_name;

use super::plugin::CodeSink;
use crate::frontend::{GoImport, ResolvedType};

/// The declaration family a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentRole {
    /// Per-file provenance comment.
    Provenance,
    /// Server implementation type and `ServeFor` factory.
    ServerSkeleton,
    ServerMethod,
    /// Client wrapper type, constructor and `NewXClientFor` factory.
    ClientWrapper,
    ClientMethod,
    /// Single-target wrapper type, constructor and `NewOneClientFor` factory.
    OneClientWrapper,
    OneClientMethod,
}

/// One emitted declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub role: FragmentRole,
    pub text: String,
}

impl Fragment {
    pub fn new(role: FragmentRole, text: String) -> Self {
        Self { role, text }
    }
}

/// A service with its names derived once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Name as declared.
    pub raw_name: String,
    /// Exported Go identifier prefix.
    pub exported: String,
    pub methods: Vec<MethodRecord>,
}

impl ServiceRecord {
    pub fn new(raw_name: &str) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            exported: exported_name(raw_name),
            methods: Vec::new(),
        }
    }
}

/// A method with resolved input and output types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    /// Name as declared; used as the remote-call identifier.
    pub raw_name: String,
    /// Exported Go method name.
    pub exported: String,
    pub input: ResolvedType,
    pub output: ResolvedType,
}

impl MethodRecord {
    pub fn new(raw_name: &str, input: ResolvedType, output: ResolvedType) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            exported: exported_name(raw_name),
            input,
            output,
        }
    }
}

/// Everything one plugin run produced for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Fragments in emission order.
    pub fragments: Vec<Fragment>,
    /// Package paths the generated code always depends on.
    pub required_packages: Vec<String>,
    /// Imports recorded while resolving method types.
    pub required_imports: BTreeSet<GoImport>,
}

impl GeneratedUnit {
    /// Fragments of a given role, in order.
    pub fn fragments_of(&self, role: FragmentRole) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.role == role)
    }

    /// Hand the unit to a sink: declare each required package once, then print every fragment in order.
    pub fn write_to<S: CodeSink + ?Sized>(&self, sink: &mut S) {
        for path in &self.required_packages {
            sink.add_import(path);
        }
        for import in &self.required_imports {
            sink.add_named_import(import);
        }
        for fragment in &self.fragments {
            sink.print(fragment);
        }
    }
}
