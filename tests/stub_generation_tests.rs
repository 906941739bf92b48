//! End-to-end stub generation scenarios.

use rpcxgen::backend::{CodeSink, Fragment, FragmentRole, Generator, Plugin, RpcxPlugin};
use rpcxgen::frontend::{
    CompiledFile, DescriptorSet, GoImport, MethodDeclaration, ServiceDeclaration, SymbolTable, TypeEntry, TypeObject,
};
use std::path::Path;

/// Sink that records every call in order.
#[derive(Default)]
struct RecordingSink {
    fragments: Vec<Fragment>,
    imports: Vec<String>,
    named_imports: Vec<GoImport>,
}

impl CodeSink for RecordingSink {
    fn print(&mut self, fragment: &Fragment) {
        self.fragments.push(fragment.clone());
    }

    fn add_import(&mut self, path: &str) {
        self.imports.push(path.to_string());
    }

    fn add_named_import(&mut self, import: &GoImport) {
        self.named_imports.push(import.clone());
    }
}

fn hello_symbols() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.define("HelloRequest", TypeObject::new("HelloRequest", "helloworld", ""));
    table.define("HelloReply", TypeObject::new("HelloReply", "helloworld", ""));
    table
}

fn greeter(name: &str) -> ServiceDeclaration {
    ServiceDeclaration::new(name).with_method(MethodDeclaration::new("SayHello", "HelloRequest", "HelloReply"))
}

fn run(file: &CompiledFile, symbols: &SymbolTable) -> RecordingSink {
    let mut sink = RecordingSink::default();
    if let Some(unit) = RpcxPlugin::default().generate(file, symbols).unwrap() {
        unit.write_to(&mut sink);
    }
    sink
}

fn text_of(sink: &RecordingSink, role: FragmentRole) -> String {
    sink.fragments
        .iter()
        .filter(|f| f.role == role)
        .map(|f| f.text.as_str())
        .collect()
}

#[test]
fn greeter_service_produces_all_three_families() {
    let file = CompiledFile::new("helloworld.proto").with_service(greeter("Greeter"));
    let sink = run(&file, &hello_symbols());

    let server = text_of(&sink, FragmentRole::ServerSkeleton);
    assert!(server.contains("type GreeterImpl struct{}"));
    assert!(server.contains("func ServeForGreeter(addr string) error {"));

    let server_method = text_of(&sink, FragmentRole::ServerMethod);
    assert!(server_method.contains(
        "func (s *GreeterImpl) SayHello(ctx context.Context, args *HelloRequest, reply *HelloReply) (err error) {"
    ));

    let client = text_of(&sink, FragmentRole::ClientWrapper);
    assert!(client.contains("type GreeterClient struct {"));
    assert!(client.contains("func NewGreeterClient(xclient client.XClient) *GreeterClient {"));
    assert!(client.contains("func NewXClientForGreeter(addr string) client.XClient {"));

    let client_method = text_of(&sink, FragmentRole::ClientMethod);
    assert!(client_method.contains(
        "func (c *GreeterClient) SayHello(ctx context.Context, args *HelloRequest) (reply *HelloReply, err error) {"
    ));
    assert!(client_method.contains("c.xclient.Call(ctx, \"SayHello\", args, reply)"));

    let one = text_of(&sink, FragmentRole::OneClientWrapper);
    assert!(one.contains("type GreeterOneClient struct {"));
    assert!(one.contains("func NewGreeterOneClient(oneclient client.OneClient) *GreeterOneClient {"));

    let one_method = text_of(&sink, FragmentRole::OneClientMethod);
    assert!(one_method.contains("func (c *GreeterOneClient) SayHello("));
    assert!(one_method.contains("c.oneclient.Call(ctx, c.serviceName, \"SayHello\", args, reply)"));
}

#[test]
fn file_without_services_emits_nothing() {
    let file = CompiledFile::new("types_only.proto");
    let sink = run(&file, &hello_symbols());
    assert!(sink.fragments.is_empty());
    assert!(sink.imports.is_empty());
    assert!(sink.named_imports.is_empty());
}

#[test]
fn empty_service_name_degrades_gracefully() {
    let file = CompiledFile::new("odd.proto").with_service(greeter(""));
    let sink = run(&file, &hello_symbols());
    let server = text_of(&sink, FragmentRole::ServerSkeleton);
    assert!(server.contains("type Impl struct{}"));
    assert!(server.contains("func ServeFor(addr string) error {"));
    assert!(server.contains("s.RegisterName(\"\", new(Impl), \"\")"));
    let client = text_of(&sink, FragmentRole::ClientWrapper);
    assert!(client.contains("func NewClient(xclient client.XClient) *Client {"));
    assert!(client.contains("func NewXClientFor(addr string) client.XClient {"));
}

#[test]
fn empty_method_name_degrades_gracefully() {
    let file = CompiledFile::new("odd.proto")
        .with_service(ServiceDeclaration::new("Greeter").with_method(MethodDeclaration::new("", "HelloRequest", "HelloReply")));
    let sink = run(&file, &hello_symbols());
    let client_method = text_of(&sink, FragmentRole::ClientMethod);
    assert!(client_method.contains("func (c *GreeterClient) (ctx context.Context"));
    assert!(client_method.contains("c.xclient.Call(ctx, \"\", args, reply)"));
}

#[test]
fn required_packages_declared_once_regardless_of_size() {
    let mut file = CompiledFile::new("big.proto");
    for i in 0..5 {
        let mut service = ServiceDeclaration::new(format!("Service{i}"));
        for j in 0..4 {
            service = service.with_method(MethodDeclaration::new(format!("Call{j}"), "HelloRequest", "HelloReply"));
        }
        file = file.with_service(service);
    }
    let sink = run(&file, &hello_symbols());
    assert_eq!(
        sink.imports,
        vec![
            "github.com/smallnest/rpcx/server",
            "github.com/smallnest/rpcx/client",
            "github.com/smallnest/rpcx/protocol",
            "context",
        ]
    );
    assert!(sink.named_imports.is_empty());
    // provenance + 5 services * (3 wrappers + 3 * 4 methods)
    assert_eq!(sink.fragments.len(), 1 + 5 * (3 + 12));
}

#[test]
fn services_are_emitted_in_declaration_order() {
    let file = CompiledFile::new("order.proto")
        .with_service(greeter("Zeta"))
        .with_service(greeter("Alpha"));
    let sink = run(&file, &hello_symbols());
    let skeletons: Vec<&Fragment> = sink
        .fragments
        .iter()
        .filter(|f| f.role == FragmentRole::ServerSkeleton)
        .collect();
    assert!(skeletons[0].text.contains("ZetaImpl"));
    assert!(skeletons[1].text.contains("AlphaImpl"));
    assert_eq!(
        sink.fragments.iter().filter(|f| f.role == FragmentRole::Provenance).count(),
        1
    );
}

#[test]
fn foreign_types_are_qualified_and_imported() {
    let set = DescriptorSet::load(Path::new("tests/fixtures/inventory.json")).unwrap();
    let files = Generator::default().generate(&set).unwrap();

    // common/types.proto has no services
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert_eq!(file.path, "inventory/inventory.rpcx.go");
    assert!(file.content.contains("package inventory\n"));
    assert!(file.content.contains(
        "import (\n\t\"context\"\n\n\tcommon \"example.com/api/common/v1\"\n\t\"github.com/smallnest/rpcx/client\"\n\t\"github.com/smallnest/rpcx/protocol\"\n\t\"github.com/smallnest/rpcx/server\"\n\t\"google.golang.org/protobuf/types/known/emptypb\"\n)\n"
    ));
    assert!(file.content.contains(
        "func (c *StockClient) Ping(ctx context.Context, args *emptypb.Empty) (reply *common.Pong, err error) {"
    ));
    assert!(file.content.contains("func (s *StockImpl) Reserve(ctx context.Context, args *ReserveRequest, reply *ReserveReply) (err error) {"));
    assert!(file.content.contains("c.xclient.Call(ctx, \"reserve\", args, reply)"));
    assert!(file.content.contains("serviceName: \"stock\","));
    assert!(file.content.contains("s.RegisterName(\"Stock\", new(StockImpl), \"\")"));
    assert!(file.content.contains("type AuditImpl struct{}"));
}

#[test]
fn server_and_client_agree_on_type_names() {
    let set = DescriptorSet::load(Path::new("tests/fixtures/inventory.json")).unwrap();
    let symbols = set.symbol_table();
    let unit = RpcxPlugin::default().generate(&set.files[1], &symbols).unwrap().unwrap();
    let server: Vec<&Fragment> = unit.fragments_of(FragmentRole::ServerMethod).collect();
    let client: Vec<&Fragment> = unit.fragments_of(FragmentRole::ClientMethod).collect();
    let one: Vec<&Fragment> = unit.fragments_of(FragmentRole::OneClientMethod).collect();
    assert_eq!(server.len(), client.len());
    assert_eq!(server.len(), one.len());

    assert!(server[1].text.contains("args *emptypb.Empty, reply *common.Pong)"));
    assert!(client[1].text.contains("args *emptypb.Empty) (reply *common.Pong, err error)"));
    assert!(one[1].text.contains("args *emptypb.Empty) (reply *common.Pong, err error)"));
}

#[test]
fn generation_is_deterministic() {
    let set = DescriptorSet::load(Path::new("tests/fixtures/inventory.json")).unwrap();
    let first = Generator::default().generate(&set).unwrap();
    let second = Generator::default().generate(&set).unwrap();
    assert_eq!(first, second);
}

fn foreign_types_set(entries: &[(&str, &str, &str)]) -> DescriptorSet {
    let mut set = DescriptorSet::default();
    set.files.push(
        CompiledFile::new("orders/orders.proto")
            .with_package("orders", "example.com/orders")
            .with_service(ServiceDeclaration::new("Orders").with_method(MethodDeclaration::new(
                "Place",
                entries[0].0,
                entries[1].0,
            ))),
    );
    for (type_ref, package, import_path) in entries {
        set.types.push(TypeEntry {
            type_ref: type_ref.to_string(),
            name: type_ref.to_string(),
            package: package.to_string(),
            import_path: import_path.to_string(),
        });
    }
    set
}

#[test]
fn same_package_name_from_different_paths_gets_an_alias() {
    let set = foreign_types_set(&[("Req", "v1", "example.com/x/v1"), ("Rep", "v1", "example.com/y/v1")]);
    let files = Generator::default().generate(&set).unwrap();
    let content = &files[0].content;

    assert!(content.contains("\t\"example.com/x/v1\"\n\tv11 \"example.com/y/v1\"\n"));
    assert!(content.contains("args *v1.Req, reply *v11.Rep) (err error) {"));
    assert!(content.contains("args *v1.Req) (reply *v11.Rep, err error) {"));
}

#[test]
fn message_package_named_client_does_not_shadow_rpcx() {
    let set = foreign_types_set(&[
        ("Req", "client", "example.com/api/client"),
        ("Rep", "context", "example.com/api/context"),
    ]);
    let files = Generator::default().generate(&set).unwrap();
    let content = &files[0].content;

    assert!(content.contains("\tclient1 \"example.com/api/client\"\n"));
    assert!(content.contains("\tcontext1 \"example.com/api/context\"\n"));
    assert!(content.contains("\t\"github.com/smallnest/rpcx/client\"\n"));
    assert!(content.contains("(ctx context.Context, args *client1.Req, reply *context1.Rep) (err error) {"));
    assert!(content.contains("xclient client.XClient"));
}

#[test]
fn missing_package_falls_back_to_file_stem() {
    let mut set = DescriptorSet::default();
    set.files.push(CompiledFile::new("api/hello-world.proto").with_service(greeter("Greeter")));
    for name in ["HelloRequest", "HelloReply"] {
        set.types.push(TypeEntry {
            type_ref: name.to_string(),
            name: name.to_string(),
            package: String::new(),
            import_path: String::new(),
        });
    }
    let files = Generator::default().generate(&set).unwrap();
    assert_eq!(files[0].path, "api/hello-world.rpcx.go");
    assert!(files[0].content.contains("\npackage hello_world\n"));
}
