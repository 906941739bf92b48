//! Well-known identifiers used by generated rpcx stubs.
//!
//! Every generated type, constructor and factory name is built here from an *exported* service name (see
//! [`crate::naming::exported_name`]). Emission code must not spell these suffixes itself.

/// Default module root of the rpcx framework.
pub const DEFAULT_RPCX_ROOT: &str = "github.com/smallnest/rpcx";

/// Default network passed to `Serve` and used in peer-to-peer discovery addresses.
pub const DEFAULT_NETWORK: &str = "tcp";

/// Extension stripped from source file names when deriving output paths.
pub const SOURCE_EXTENSION: &str = ".proto";

/// Extension appended to derive the generated file path.
pub const OUTPUT_EXTENSION: &str = ".rpcx.go";

/// Identify one of the packages every file with services depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequiredPackageId {
    Server,
    Client,
    Protocol,
    Context,
}

/// Describe a required package.
#[derive(Debug, Clone, Copy)]
pub struct RequiredPackageInfo {
    pub id: RequiredPackageId,
    /// Path below the rpcx root, or the full path when `stdlib` is set.
    pub path: &'static str,
    /// Whether the package belongs to the Go standard library.
    pub stdlib: bool,
}

/// Packages declared for every file that contains at least one service, in declaration order.
pub const REQUIRED_PACKAGES: &[RequiredPackageInfo] = &[
    RequiredPackageInfo {
        id: RequiredPackageId::Server,
        path: "server",
        stdlib: false,
    },
    RequiredPackageInfo {
        id: RequiredPackageId::Client,
        path: "client",
        stdlib: false,
    },
    RequiredPackageInfo {
        id: RequiredPackageId::Protocol,
        path: "protocol",
        stdlib: false,
    },
    RequiredPackageInfo {
        id: RequiredPackageId::Context,
        path: "context",
        stdlib: true,
    },
];

/// Look up the descriptor for a required package.
pub fn info(id: RequiredPackageId) -> &'static RequiredPackageInfo {
    match id {
        RequiredPackageId::Server => &REQUIRED_PACKAGES[0],
        RequiredPackageId::Client => &REQUIRED_PACKAGES[1],
        RequiredPackageId::Protocol => &REQUIRED_PACKAGES[2],
        RequiredPackageId::Context => &REQUIRED_PACKAGES[3],
    }
}

/// Return the full import path of a required package for the given rpcx module root.
pub fn package_path(id: RequiredPackageId, rpcx_root: &str) -> String {
    let info = info(id);
    if info.stdlib {
        info.path.to_string()
    } else {
        format!("{}/{}", rpcx_root.trim_end_matches('/'), info.path)
    }
}

/// Server implementation type: `GreeterImpl`.
pub fn impl_type(service: &str) -> String {
    format!("{service}Impl")
}

/// Server factory: `ServeForGreeter`.
pub fn serve_fn(service: &str) -> String {
    format!("ServeFor{service}")
}

/// Client wrapper type: `GreeterClient`.
pub fn client_type(service: &str) -> String {
    format!("{service}Client")
}

/// Client wrapper constructor: `NewGreeterClient`.
pub fn client_ctor(service: &str) -> String {
    format!("New{service}Client")
}

/// Dispatch client factory: `NewXClientForGreeter`.
pub fn xclient_factory(service: &str) -> String {
    format!("NewXClientFor{service}")
}

/// Single-target wrapper type: `GreeterOneClient`.
pub fn one_client_type(service: &str) -> String {
    format!("{service}OneClient")
}

/// Single-target wrapper constructor: `NewGreeterOneClient`.
pub fn one_client_ctor(service: &str) -> String {
    format!("New{service}OneClient")
}

/// Single-target client factory: `NewOneClientForGreeter`.
pub fn one_client_factory(service: &str) -> String {
    format!("NewOneClientFor{service}")
}

/// Derive the generated file path from a source file name (`helloworld.proto` → `helloworld.rpcx.go`).
pub fn output_path(source: &str) -> String {
    let stem = source.strip_suffix(SOURCE_EXTENSION).unwrap_or(source);
    format!("{stem}{OUTPUT_EXTENSION}")
}
