//! Symbol table and per-file type resolution.
//!
//! The table maps opaque type references to the Go objects the schema compiler generated for them. Resolution is
//! explicit: callers create a [`ResolutionContext`] for the file being generated, thread it through every
//! [`SymbolTable::resolve`] call, and take the recorded imports back out when emission succeeds.
//!
//! ## Notes
//!
//! - Package qualifiers are allocated per file. The first import path to claim a package name keeps it; a later
//!   path with the same name gets a numbered alias (`v1`, `v11`, `v12`, ...). Names reserved up front (the
//!   packages every stub imports) are never handed to a message package.

use std::collections::{BTreeMap, BTreeSet};

use rpcxgen_core::naming::go_package_name;

/// A generated Go message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeObject {
    /// Go identifier (`HelloRequest`).
    pub name: String,
    /// Go package name (`helloworld`).
    pub package: String,
    /// Go import path (`example.com/helloworld`). Empty means "same package as the generated file".
    pub import_path: String,
}

impl TypeObject {
    pub fn new(name: impl Into<String>, package: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            import_path: import_path.into(),
        }
    }

    /// Preferred package qualifier used when the type is printed outside its own package.
    fn qualifier(&self) -> String {
        if !self.package.is_empty() {
            return self.package.clone();
        }
        go_package_name(self.import_path.rsplit('/').next().unwrap_or_default())
    }
}

/// A Go import required by resolved types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoImport {
    pub path: String,
    /// Package name the generated code refers to.
    pub name: String,
}

impl GoImport {
    /// Whether the package name differs from the last path segment and must be spelled out.
    pub fn needs_alias(&self) -> bool {
        self.path.rsplit('/').next() != Some(self.name.as_str())
    }
}

/// The printable form of a resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Canonical name as printed in generated code (`HelloReply` or `pb.HelloReply`).
    pub name: String,
    /// Import the name depends on, if the type lives in another package.
    pub import: Option<GoImport>,
}

/// A type reference that is not in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("symbol not found: `{type_ref}`")]
#[diagnostic(
    code(rpcxgen::symbol_not_found),
    help("the descriptor set must define every type referenced by a method")
)]
pub struct SymbolNotFound {
    pub type_ref: String,
}

/// Per-file resolution state: which types were used, which imports they require and which package names are taken.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    import_path: String,
    used: BTreeSet<String>,
    imports: BTreeSet<GoImport>,
    /// Package name → import path bound to it in the generated file.
    qualifiers: BTreeMap<String, String>,
}

impl ResolutionContext {
    /// Create a context for a file generated into `import_path`.
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
            used: BTreeSet::new(),
            imports: BTreeSet::new(),
            qualifiers: BTreeMap::new(),
        }
    }

    /// Bind an import path the generated file always uses to its last path segment.
    ///
    /// Types from other paths can no longer print with that qualifier. Types from `path` itself reuse it.
    pub fn reserve(&mut self, path: &str) {
        let name = path.rsplit('/').next().unwrap_or_default();
        self.qualifiers
            .entry(name.to_string())
            .or_insert_with(|| path.to_string());
    }

    /// The qualifier bound to `path`, if any.
    pub fn qualifier_for(&self, path: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|(_, bound)| bound.as_str() == path)
            .map(|(name, _)| name.as_str())
    }

    /// Whether `type_ref` has been resolved through this context.
    pub fn is_used(&self, type_ref: &str) -> bool {
        self.used.contains(type_ref)
    }

    /// Type references resolved so far, in sorted order.
    pub fn used_types(&self) -> impl Iterator<Item = &str> {
        self.used.iter().map(String::as_str)
    }

    /// Consume the context and return the imports the resolved types require.
    pub fn into_required_imports(self) -> BTreeSet<GoImport> {
        self.imports
    }

    fn is_local(&self, object: &TypeObject) -> bool {
        object.import_path.is_empty() || object.import_path == self.import_path
    }

    /// Return the import for a foreign type, allocating a free qualifier on first use of its path.
    fn bind(&mut self, object: &TypeObject) -> GoImport {
        if let Some(name) = self.qualifier_for(&object.import_path) {
            return GoImport {
                path: object.import_path.clone(),
                name: name.to_string(),
            };
        }

        let base = object.qualifier();
        let mut name = base.clone();
        let mut n = 1;
        while self.qualifiers.contains_key(&name) {
            name = format!("{base}{n}");
            n += 1;
        }
        if name != base {
            tracing::debug!(path = %object.import_path, alias = %name, "package name taken, aliasing import");
        }
        self.qualifiers.insert(name.clone(), object.import_path.clone());
        GoImport {
            path: object.import_path.clone(),
            name,
        }
    }

    fn record(&mut self, type_ref: &str, import: Option<&GoImport>) {
        self.used.insert(type_ref.to_string());
        if let Some(import) = import {
            self.imports.insert(import.clone());
        }
    }
}

/// Map from type references to generated Go objects.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    types: BTreeMap<String, TypeObject>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a type reference.
    pub fn define(&mut self, type_ref: impl Into<String>, object: TypeObject) {
        self.types.insert(type_ref.into(), object);
    }

    pub fn get(&self, type_ref: &str) -> Option<&TypeObject> {
        self.types.get(type_ref)
    }

    pub fn contains(&self, type_ref: &str) -> bool {
        self.types.contains_key(type_ref)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a type reference to its printable name and record the use in `ctx`.
    ///
    /// A failed lookup leaves `ctx` untouched.
    pub fn resolve(&self, ctx: &mut ResolutionContext, type_ref: &str) -> Result<ResolvedType, SymbolNotFound> {
        let object = self.get(type_ref).ok_or_else(|| SymbolNotFound {
            type_ref: type_ref.to_string(),
        })?;

        let resolved = if ctx.is_local(object) {
            ResolvedType {
                name: object.name.clone(),
                import: None,
            }
        } else {
            let import = ctx.bind(object);
            ResolvedType {
                name: format!("{}.{}", import.name, object.name),
                import: Some(import),
            }
        };

        ctx.record(type_ref, resolved.import.as_ref());
        tracing::trace!(type_ref, name = %resolved.name, "resolved type");
        Ok(resolved)
    }
}
