//! Generator configuration
//!
//! Controls the rpcx-specific literals baked into generated stubs: module root, network, serialization and the
//! client selection/failure policies. Defaults reproduce the canonical rpcx quick-start setup.

use std::fmt;
use std::str::FromStr;

use rpcxgen_core::conventions::{DEFAULT_NETWORK, DEFAULT_RPCX_ROOT};

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Module root of the rpcx framework (`github.com/smallnest/rpcx`)
    pub rpcx_root: String,
    /// Network used by `Serve` and peer-to-peer discovery
    pub network: String,
    /// Wire encoding requested by generated client factories
    pub serialize_type: SerializeType,
    /// Failure-handling policy of generated client factories
    pub fail_mode: FailMode,
    /// Load-selection policy of generated client factories
    pub select_mode: SelectMode,
    /// Name of the plugin to run
    pub plugin: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rpcx_root: DEFAULT_RPCX_ROOT.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            serialize_type: SerializeType::ProtoBuffer,
            fail_mode: FailMode::Failtry,
            select_mode: SelectMode::RoundRobin,
            plugin: crate::backend::rpcx::PLUGIN_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rpcx_root(mut self, root: impl Into<String>) -> Self {
        self.rpcx_root = root.into();
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn with_serialize_type(mut self, serialize_type: SerializeType) -> Self {
        self.serialize_type = serialize_type;
        self
    }

    pub fn with_fail_mode(mut self, fail_mode: FailMode) -> Self {
        self.fail_mode = fail_mode;
        self
    }

    pub fn with_select_mode(mut self, select_mode: SelectMode) -> Self {
        self.select_mode = select_mode;
        self
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }

    /// Parse a protoc-style parameter string (`key=value,key=value`) on top of the defaults.
    ///
    /// Recognized keys: `rpcx_root`, `network`, `serialize`, `fail_mode`, `select_mode`, `plugins`.
    pub fn from_parameter(param: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for part in param.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                return Err(ConfigError::MalformedOption(part.to_string()));
            };
            let (key, value) = (key.trim(), value.trim());
            if value.is_empty() {
                return Err(ConfigError::MalformedOption(part.to_string()));
            }
            match key {
                "rpcx_root" => config.rpcx_root = value.to_string(),
                "network" => config.network = value.to_string(),
                "serialize" => config.serialize_type = value.parse()?,
                "fail_mode" => config.fail_mode = value.parse()?,
                "select_mode" => config.select_mode = value.parse()?,
                "plugins" => config.plugin = value.to_string(),
                _ => return Err(ConfigError::UnknownOption(key.to_string())),
            }
        }
        Ok(config)
    }
}

/// Error parsing generator options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    #[diagnostic(
        code(rpcxgen::config::unknown_option),
        help("expected one of: rpcx_root, network, serialize, fail_mode, select_mode, plugins")
    )]
    UnknownOption(String),

    #[error("malformed option `{0}`, expected `key=value`")]
    #[diagnostic(code(rpcxgen::config::malformed))]
    MalformedOption(String),

    #[error("invalid value `{value}` for {kind}")]
    #[diagnostic(code(rpcxgen::config::invalid_value))]
    InvalidValue { kind: &'static str, value: String },
}

macro_rules! rpcx_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $qualifier:literal { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All variants, in rpcx declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The rpcx identifier (`ProtoBuffer`, `Failtry`, ...).
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// The qualified Go expression used in generated code.
            pub fn go_expr(self) -> String {
                format!("{}.{}", $qualifier, self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ConfigError::InvalidValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

rpcx_enum! {
    /// rpcx `protocol.SerializeType`.
    SerializeType, "serialize type", "protocol" {
        SerializeNone,
        JSON,
        ProtoBuffer,
        MsgPack,
        Thrift,
    }
}

rpcx_enum! {
    /// rpcx `client.FailMode`.
    FailMode, "fail mode", "client" {
        Failover,
        Failfast,
        Failtry,
        Failbackup,
    }
}

rpcx_enum! {
    /// rpcx `client.SelectMode`.
    SelectMode, "select mode", "client" {
        RandomSelect,
        RoundRobin,
        WeightedRoundRobin,
        WeightedICMP,
        ConsistentHash,
        Closest,
    }
}
