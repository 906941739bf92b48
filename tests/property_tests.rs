//! Property-based tests for rpcxgen
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use rpcxgen::backend::{CodeSink, Fragment, FragmentRole, Plugin, RpcxPlugin};
use rpcxgen::frontend::{CompiledFile, GoImport, MethodDeclaration, ServiceDeclaration, SymbolTable, TypeObject};
use rpcxgen_core::exported_name;

#[derive(Default)]
struct RecordingSink {
    fragments: Vec<Fragment>,
    imports: Vec<String>,
}

impl CodeSink for RecordingSink {
    fn print(&mut self, fragment: &Fragment) {
        self.fragments.push(fragment.clone());
    }

    fn add_import(&mut self, path: &str) {
        self.imports.push(path.to_string());
    }

    fn add_named_import(&mut self, import: &GoImport) {
        self.imports.push(import.path.clone());
    }
}

fn symbols() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.define("Req", TypeObject::new("Req", "pb", ""));
    table.define("Reply", TypeObject::new("Reply", "pb", ""));
    table
}

fn ident() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,15}"
}

/// A file with the given service and method names, every method using local types.
fn file_with(services: &[(String, Vec<String>)]) -> CompiledFile {
    let mut file = CompiledFile::new("gen.proto");
    for (name, methods) in services {
        let mut service = ServiceDeclaration::new(name.clone());
        for method in methods {
            service = service.with_method(MethodDeclaration::new(method.clone(), "Req", "Reply"));
        }
        file = file.with_service(service);
    }
    file
}

fn services() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec((ident(), prop::collection::vec(ident(), 0..4)), 0..4)
}

// =============================================================================
// Naming Properties
// =============================================================================

proptest! {
    /// Property: exporting an exported name changes nothing
    #[test]
    fn exported_name_is_idempotent(raw in "[a-zA-Zà-ÿ_][a-zA-Z0-9_]{0,15}") {
        let once = exported_name(&raw);
        prop_assert_eq!(exported_name(&once), once.clone());
    }

    /// Property: only the first character may change
    #[test]
    fn exported_name_keeps_the_tail(raw in "[a-z][a-zA-Z0-9_]{0,15}") {
        let exported = exported_name(&raw);
        prop_assert_eq!(&exported[1..], &raw[1..]);
    }
}

#[test]
fn exported_name_of_empty_is_empty() {
    assert_eq!(exported_name(""), "");
}

// =============================================================================
// Emission Properties
// =============================================================================

proptest! {
    /// Property: the same input always produces the same fragments
    #[test]
    fn emission_is_deterministic(services in services()) {
        let file = file_with(&services);
        let first = RpcxPlugin::default().generate(&file, &symbols()).unwrap();
        let second = RpcxPlugin::default().generate(&file, &symbols()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: each required package is declared exactly once, whatever the file size
    #[test]
    fn required_packages_declared_once(services in services()) {
        let file = file_with(&services);
        let mut sink = RecordingSink::default();
        if let Some(unit) = RpcxPlugin::default().generate(&file, &symbols()).unwrap() {
            unit.write_to(&mut sink);
        }

        if services.is_empty() {
            prop_assert!(sink.imports.is_empty());
            prop_assert!(sink.fragments.is_empty());
        } else {
            prop_assert_eq!(sink.imports.len(), 4);
            let mut unique = sink.imports.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), 4);
        }
    }

    /// Property: every family has one method fragment per declared method
    #[test]
    fn method_fragments_match_declarations(services in services()) {
        prop_assume!(!services.is_empty());
        let file = file_with(&services);
        let unit = RpcxPlugin::default().generate(&file, &symbols()).unwrap().unwrap();
        let total: usize = services.iter().map(|(_, m)| m.len()).sum();

        prop_assert_eq!(unit.fragments_of(FragmentRole::ServerMethod).count(), total);
        prop_assert_eq!(unit.fragments_of(FragmentRole::ClientMethod).count(), total);
        prop_assert_eq!(unit.fragments_of(FragmentRole::OneClientMethod).count(), total);
        prop_assert_eq!(unit.fragments_of(FragmentRole::ServerSkeleton).count(), services.len());
        prop_assert_eq!(unit.fragments_of(FragmentRole::Provenance).count(), 1);
    }

    /// Property: every call site passes the method name as declared, and the wrapper uses the exported one
    #[test]
    fn call_sites_use_raw_method_names(method in ident()) {
        let file = file_with(&[("svc".to_string(), vec![method.clone()])]);
        let unit = RpcxPlugin::default().generate(&file, &symbols()).unwrap().unwrap();

        let client = unit.fragments_of(FragmentRole::ClientMethod).next().unwrap();
        let call = format!("c.xclient.Call(ctx, \"{}\", args, reply)", method);
        prop_assert!(client.text.contains(&call));
        let signature = format!("func (c *SvcClient) {}(", exported_name(&method));
        prop_assert!(client.text.contains(&signature));
    }
}
