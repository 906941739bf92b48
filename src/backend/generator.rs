//! Host pipeline: run a plugin over every compiled file and assemble Go source files.
//!
//! ```text
//! DescriptorSet → Generator → Plugin::generate (per file) → GeneratedUnit → GoFile (CodeSink) → GeneratedFile
//! ```
//!
//! ## Notes
//!
//! - Files are processed in descriptor order. The first failing file aborts the run; nothing is returned for
//!   files that were already generated.
//! - Emission is in-memory only. Writing files is the CLI's job.

use std::collections::BTreeMap;

use rpcxgen_core::conventions;

use super::errors::GenerationError;
use super::fragment::Fragment;
use super::plugin::{CodeSink, Plugin};
use super::rpcx::RpcxPlugin;
use crate::config::GeneratorConfig;
use crate::frontend::{CompiledFile, DescriptorSet, GoImport, SymbolTable};

/// A generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub path: String,
    pub content: String,
}

/// A Go source file under construction. Implements [`CodeSink`].
#[derive(Debug, Default)]
pub struct GoFile {
    package: String,
    /// Import path → explicit package name (when the name differs from the last path segment).
    imports: BTreeMap<String, Option<String>>,
    body: Vec<String>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Render the file: header, package clause, grouped imports, then the body blocks separated by blank lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "// Code generated by rpcxgen v{}. DO NOT EDIT.\n\n",
            crate::version::RPCXGEN_VERSION
        ));
        out.push_str(&format!("package {}\n", self.package));

        if !self.imports.is_empty() {
            let (stdlib, third_party): (Vec<_>, Vec<_>) =
                self.imports.iter().partition(|(path, _)| is_stdlib_path(path));
            out.push_str("\nimport (\n");
            for (i, group) in [stdlib, third_party].iter().filter(|g| !g.is_empty()).enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                for (path, alias) in group {
                    match alias {
                        Some(alias) => out.push_str(&format!("\t{} \"{}\"\n", alias, path)),
                        None => out.push_str(&format!("\t\"{}\"\n", path)),
                    }
                }
            }
            out.push_str(")\n");
        }

        for block in &self.body {
            out.push('\n');
            out.push_str(block);
        }
        out
    }
}

/// Standard-library import paths have no dot in their first element.
fn is_stdlib_path(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

impl CodeSink for GoFile {
    fn print(&mut self, fragment: &Fragment) {
        self.body.push(fragment.text.clone());
    }

    fn add_import(&mut self, path: &str) {
        self.imports.entry(path.to_string()).or_insert(None);
    }

    fn add_named_import(&mut self, import: &GoImport) {
        let alias = import.needs_alias().then(|| import.name.clone());
        self.imports.insert(import.path.clone(), alias);
    }
}

/// Runs a registered plugin over compiled files.
pub struct Generator {
    plugins: Vec<Box<dyn Plugin>>,
    selected: String,
}

impl Generator {
    /// Create a generator with the built-in plugins, selecting the one named by `config.plugin`.
    pub fn new(config: GeneratorConfig) -> Self {
        let selected = config.plugin.clone();
        let mut generator = Self {
            plugins: Vec::new(),
            selected,
        };
        generator.register(Box::new(RpcxPlugin::new(config)));
        generator
    }

    /// Register a plugin. A plugin with the same name replaces the earlier one.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.retain(|p| p.name() != plugin.name());
        self.plugins.push(plugin);
    }

    /// Names of the registered plugins, in registration order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    fn plugin(&self) -> Result<&dyn Plugin, GenerationError> {
        self.plugins
            .iter()
            .find(|p| p.name() == self.selected)
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                tracing::error!(plugin = %self.selected, available = ?self.plugin_names(), "plugin not registered");
                GenerationError::UnknownPlugin(self.selected.clone())
            })
    }

    /// Generate one file. Returns `Ok(None)` when the plugin has nothing to emit for it.
    fn run_plugin(
        plugin: &dyn Plugin,
        file: &CompiledFile,
        symbols: &SymbolTable,
    ) -> Result<Option<GeneratedFile>, GenerationError> {
        let Some(unit) = plugin.generate(file, symbols)? else {
            return Ok(None);
        };

        let mut go_file = GoFile::new(file.go_package());
        unit.write_to(&mut go_file);
        Ok(Some(GeneratedFile {
            path: conventions::output_path(&file.name),
            content: go_file.render(),
        }))
    }

    /// Generate every file of a descriptor set, in order.
    pub fn generate(&self, set: &DescriptorSet) -> Result<Vec<GeneratedFile>, GenerationError> {
        let plugin = self.plugin()?;
        let symbols = set.symbol_table();
        if symbols.is_empty() && set.files.iter().any(CompiledFile::has_services) {
            tracing::warn!("descriptor set defines no types, every method will fail to resolve");
        }
        tracing::debug!(plugin = plugin.name(), symbols = symbols.len(), "starting generation");
        let mut out = Vec::new();
        for file in &set.files {
            match Self::run_plugin(plugin, file, &symbols) {
                Ok(Some(generated)) => out.push(generated),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(file = %file.name, error = %err, "generation failed");
                    return Err(err);
                }
            }
        }
        tracing::debug!(generated = out.len(), files = set.files.len(), "generation complete");
        Ok(out)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::fragment::{FragmentRole, GeneratedUnit};

    #[test]
    fn test_go_file_groups_imports() {
        let mut file = GoFile::new("helloworld");
        file.add_import("github.com/smallnest/rpcx/server");
        file.add_import("context");
        file.add_named_import(&GoImport {
            path: "example.com/api/common/v1".to_string(),
            name: "common".to_string(),
        });
        let rendered = file.render();
        assert!(rendered.contains(
            "import (\n\t\"context\"\n\n\tcommon \"example.com/api/common/v1\"\n\t\"github.com/smallnest/rpcx/server\"\n)\n"
        ));
    }

    #[test]
    fn test_go_file_without_imports() {
        let file = GoFile::new("empty");
        let rendered = file.render();
        assert!(rendered.ends_with("package empty\n"));
        assert!(!rendered.contains("import"));
    }

    #[test]
    fn test_duplicate_imports_collapse() {
        let mut file = GoFile::new("p");
        file.add_import("context");
        file.add_import("context");
        assert_eq!(file.render().matches("\"context\"").count(), 1);
    }

    #[test]
    fn test_body_blocks_separated_by_blank_lines() {
        let mut file = GoFile::new("p");
        let unit = GeneratedUnit {
            fragments: vec![
                Fragment::new(FragmentRole::Provenance, "// a\n".to_string()),
                Fragment::new(FragmentRole::ServerSkeleton, "// b\n".to_string()),
            ],
            ..GeneratedUnit::default()
        };
        unit.write_to(&mut file);
        assert!(file.render().ends_with("package p\n\n// a\n\n// b\n"));
    }

    #[test]
    fn test_unknown_plugin() {
        let generator = Generator::new(GeneratorConfig::new().with_plugin("grpc"));
        let err = generator.generate(&DescriptorSet::default()).unwrap_err();
        assert!(matches!(err, GenerationError::UnknownPlugin(ref name) if name == "grpc"));
    }

    #[test]
    fn test_services_without_types_fail_to_resolve() {
        use crate::frontend::{MethodDeclaration, ServiceDeclaration};

        let mut set = DescriptorSet::default();
        set.files.push(CompiledFile::new("bare.proto").with_service(
            ServiceDeclaration::new("Bare").with_method(MethodDeclaration::new("Ping", "Req", "Rep")),
        ));
        assert!(set.symbol_table().is_empty());
        let err = Generator::default().generate(&set).unwrap_err();
        assert_eq!(err.missing_symbol(), Some("Req"));
    }

    #[test]
    fn test_builtin_plugins() {
        assert_eq!(Generator::default().plugin_names(), vec!["rpcx"]);
    }
}
