//! Emit the three rpcx calling-convention families.
//!
//! One function per fragment role. Each takes pre-resolved records and returns a finished [`Fragment`]; none of
//! them can fail. Identifiers come from [`rpcxgen_core::conventions`] so every family spells a service the same
//! way.

use rpcxgen_core::conventions;

use crate::backend::fragment::{Fragment, FragmentRole, MethodRecord, ServiceRecord};
use crate::backend::go_emitter::{GoEmitter, go_string};
use crate::config::GeneratorConfig;

const FACTORY_OPTIONS_DOC: &str =
    "You can configure this client with more options such as etcd registry, serialize type, select algorithm and fail mode.";

/// Provenance comment naming the source file.
pub fn provenance(file_name: &str) -> Fragment {
    let mut e = GoEmitter::new();
    e.comment("This following code was generated by rpcx");
    e.comment(&format!("Generated from {}", file_name));
    Fragment::new(FragmentRole::Provenance, e.finish())
}

/// `<S>Impl` and `ServeFor<S>`.
pub fn server_skeleton(service: &ServiceRecord, config: &GeneratorConfig) -> Fragment {
    let name = &service.exported;
    let impl_type = conventions::impl_type(name);
    let serve_fn = conventions::serve_fn(name);

    let mut e = GoEmitter::new();
    e.comment("================== server skeleton ===================");
    e.struct_def(&impl_type, &[]);
    e.blank_line();
    e.doc_comment(&format!(
        "{} starts a server only registers one service.\n\
         You can register more services and only start one server.\n\
         It blocks until the application exits.",
        serve_fn
    ));
    e.func(None, &serve_fn, "addr string", "error", |e| {
        e.line("s := server.NewServer()");
        e.linef(format_args!("s.RegisterName({}, new({}), \"\")", go_string(name), impl_type));
        e.linef(format_args!("return s.Serve({}, addr)", go_string(&config.network)));
    });
    Fragment::new(FragmentRole::ServerSkeleton, e.finish())
}

/// Placeholder server method filling `reply` with a zero value.
pub fn server_method(service: &ServiceRecord, method: &MethodRecord) -> Fragment {
    let receiver = format!("s *{}", conventions::impl_type(&service.exported));
    let params = format!(
        "ctx context.Context, args *{}, reply *{}",
        method.input.name, method.output.name
    );

    let mut e = GoEmitter::new();
    e.comment(&format!("{} is server rpc method as defined", method.exported));
    e.func(Some(&receiver), &method.exported, &params, "(err error)", |e| {
        e.comment("Add business logic here.");
        e.blank_line();
        e.comment("Set return values.");
        e.linef(format_args!("*reply = {}{{}}", method.output.name));
        e.blank_line();
        e.line("return nil");
    });
    Fragment::new(FragmentRole::ServerMethod, e.finish())
}

/// Build a point-to-point discovery and default options, then hand them to `make_client`.
fn factory_body(e: &mut GoEmitter, config: &GeneratorConfig, var: &str, make_client: &str) {
    e.linef(format_args!(
        "d := client.NewPeer2PeerDiscovery({}+addr, \"\")",
        go_string(&format!("{}@", config.network))
    ));
    e.line("opt := client.DefaultOption");
    e.linef(format_args!("opt.SerializeType = {}", config.serialize_type.go_expr()));
    e.blank_line();
    e.linef(format_args!("{} := {}", var, make_client));
    e.linef(format_args!("return {}", var));
}

/// `<S>Client`, `New<S>Client` and `NewXClientFor<S>`.
pub fn client_wrapper(service: &ServiceRecord, config: &GeneratorConfig) -> Fragment {
    let name = &service.exported;
    let client_type = conventions::client_type(name);
    let ctor = conventions::client_ctor(name);
    let factory = conventions::xclient_factory(name);

    let mut e = GoEmitter::new();
    e.comment("================== client stub ===================");
    e.comment(&format!("{} is a client wrapped XClient.", client_type));
    e.struct_def(&client_type, &[("xclient", "client.XClient")]);
    e.blank_line();
    e.doc_comment(&format!(
        "{} wraps a XClient as {}.\nYou can pass a shared XClient object created by {}.",
        ctor, client_type, factory
    ));
    e.func(None, &ctor, "xclient client.XClient", &format!("*{}", client_type), |e| {
        e.linef(format_args!("return &{}{{xclient: xclient}}", client_type));
    });
    e.blank_line();
    e.doc_comment(&format!("{} creates a XClient.\n{}", factory, FACTORY_OPTIONS_DOC));
    e.func(None, &factory, "addr string", "client.XClient", |e| {
        let make = format!(
            "client.NewXClient({}, {}, {}, d, opt)",
            go_string(name),
            config.fail_mode.go_expr(),
            config.select_mode.go_expr()
        );
        factory_body(e, config, "xclient", &make);
    });
    Fragment::new(FragmentRole::ClientWrapper, e.finish())
}

/// Client method calling the wrapped XClient with the raw method name.
pub fn client_method(service: &ServiceRecord, method: &MethodRecord) -> Fragment {
    let receiver = format!("c *{}", conventions::client_type(&service.exported));
    let mut e = GoEmitter::new();
    e.comment(&format!("{} is client rpc method as defined", method.exported));
    e.func(
        Some(&receiver),
        &method.exported,
        &format!("ctx context.Context, args *{}", method.input.name),
        &format!("(reply *{}, err error)", method.output.name),
        |e| {
            e.linef(format_args!("reply = &{}{{}}", method.output.name));
            e.linef(format_args!(
                "err = c.xclient.Call(ctx, {}, args, reply)",
                go_string(&method.raw_name)
            ));
            e.line("return reply, err");
        },
    );
    Fragment::new(FragmentRole::ClientMethod, e.finish())
}

/// `<S>OneClient`, `New<S>OneClient` and `NewOneClientFor<S>`.
///
/// The wrapper calls the service by its name as declared, while `ServeFor<S>` and `NewXClientFor<S>` use the
/// exported name. The two only differ for services whose declared name is not already exported.
pub fn one_client_wrapper(service: &ServiceRecord, config: &GeneratorConfig) -> Fragment {
    let name = &service.exported;
    let one_type = conventions::one_client_type(name);
    let ctor = conventions::one_client_ctor(name);
    let factory = conventions::one_client_factory(name);
    let service_name = go_string(&service.raw_name);

    let mut e = GoEmitter::new();
    e.comment("================== oneclient stub ===================");
    e.comment(&format!("{} is a client wrapped oneClient.", one_type));
    e.struct_def(&one_type, &[("serviceName", "string"), ("oneclient", "client.OneClient")]);
    e.blank_line();
    e.doc_comment(&format!(
        "{} wraps a OneClient as {}.\nYou can pass a shared OneClient object created by {}.",
        ctor, one_type, factory
    ));
    e.func(None, &ctor, "oneclient client.OneClient", &format!("*{}", one_type), |e| {
        e.keyed_literal(
            "return &",
            &one_type,
            &[("serviceName", service_name.as_str()), ("oneclient", "oneclient")],
        );
    });
    e.blank_line();
    e.doc_comment(&format!("{} creates a OneClient.\n{}", factory, FACTORY_OPTIONS_DOC));
    e.func(None, &factory, "addr string", "client.OneClient", |e| {
        let make = format!(
            "client.NewOneClient({}, {}, d, opt)",
            config.fail_mode.go_expr(),
            config.select_mode.go_expr()
        );
        factory_body(e, config, "oneclient", &make);
    });
    Fragment::new(FragmentRole::OneClientWrapper, e.finish())
}

/// Single-target method passing both the service name and the raw method name.
pub fn one_client_method(service: &ServiceRecord, method: &MethodRecord) -> Fragment {
    let receiver = format!("c *{}", conventions::one_client_type(&service.exported));
    let mut e = GoEmitter::new();
    e.comment(&format!("{} is client rpc method as defined", method.exported));
    e.func(
        Some(&receiver),
        &method.exported,
        &format!("ctx context.Context, args *{}", method.input.name),
        &format!("(reply *{}, err error)", method.output.name),
        |e| {
            e.linef(format_args!("reply = &{}{{}}", method.output.name));
            e.linef(format_args!(
                "err = c.oneclient.Call(ctx, c.serviceName, {}, args, reply)",
                go_string(&method.raw_name)
            ));
            e.line("return reply, err");
        },
    );
    Fragment::new(FragmentRole::OneClientMethod, e.finish())
}
