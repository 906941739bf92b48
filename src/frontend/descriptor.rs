//! Compiled descriptor model consumed by the generators.
//!
//! The schema compiler upstream is responsible for parsing interface definitions and laying out messages. What
//! reaches this crate is a [`DescriptorSet`]: the compiled files to generate for, plus the symbol entries that
//! describe every message type a method may reference.
//!
//! ## Notes
//!
//! - Service and method order is preserved exactly as declared; emission relies on it for determinism.
//! - Type references are opaque keys into the symbol table (usually fully-qualified names such as
//!   `.helloworld.HelloRequest`) and are never printed directly.

use std::fs;
use std::path::{Path, PathBuf};

use rpcxgen_core::naming::go_package_name;
use serde::{Deserialize, Serialize};

use super::symbols::{SymbolTable, TypeObject};

/// A compilation unit: one source file and the services it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledFile {
    /// Source file name, used for the provenance comment and the output path.
    pub name: String,
    /// Go package name of the generated file.
    #[serde(default)]
    pub package: String,
    /// Go import path of the generated file. Types living here print unqualified.
    #[serde(default)]
    pub import_path: String,
    #[serde(default)]
    pub services: Vec<ServiceDeclaration>,
}

impl CompiledFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            import_path: String::new(),
            services: Vec::new(),
        }
    }

    /// Set the Go package name and import path.
    pub fn with_package(mut self, package: impl Into<String>, import_path: impl Into<String>) -> Self {
        self.package = package.into();
        self.import_path = import_path.into();
        self
    }

    pub fn with_service(mut self, service: ServiceDeclaration) -> Self {
        self.services.push(service);
        self
    }

    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }

    /// Go package name for the generated file.
    ///
    /// Falls back to the last import path segment, then to the source file stem, so the result is never empty.
    pub fn go_package(&self) -> String {
        if !self.package.is_empty() {
            return self.package.clone();
        }
        let segment = self.import_path.rsplit('/').next().unwrap_or_default();
        if !segment.is_empty() {
            return go_package_name(segment);
        }
        let base = self.name.rsplit('/').next().unwrap_or_default();
        let stem = base.rsplit_once('.').map_or(base, |(stem, _)| stem);
        go_package_name(stem)
    }
}

/// A named group of remote methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDeclaration {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

impl ServiceDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// One remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, input_type: impl Into<String>, output_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
        }
    }
}

/// A symbol table entry as supplied by the schema compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    /// Key used by method declarations.
    pub type_ref: String,
    /// Go identifier of the generated message type.
    pub name: String,
    /// Go package name the message is generated into.
    #[serde(default)]
    pub package: String,
    /// Go import path the message is generated into.
    #[serde(default)]
    pub import_path: String,
}

/// Input to one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSet {
    #[serde(default)]
    pub files: Vec<CompiledFile>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// Error loading a descriptor set.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DescriptorError {
    #[error("failed to read descriptor set {path}")]
    #[diagnostic(code(rpcxgen::descriptor::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid descriptor set{}", display_path(.path))]
    #[diagnostic(
        code(rpcxgen::descriptor::json),
        help("descriptor sets are JSON objects with `files` and `types` arrays")
    )]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default()
}

impl DescriptorSet {
    /// Parse a descriptor set from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        serde_json::from_str(json).map_err(|source| DescriptorError::Json { path: None, source })
    }

    /// Read and parse a descriptor set from disk.
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let text = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DescriptorError::Json {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Build the symbol table from the type entries. Later entries for the same reference replace earlier ones.
    pub fn symbol_table(&self) -> SymbolTable {
        let mut table = SymbolTable::new();
        for entry in &self.types {
            table.define(
                entry.type_ref.clone(),
                TypeObject::new(entry.name.clone(), entry.package.clone(), entry.import_path.clone()),
            );
        }
        table
    }
}
