//! rpcx stub plugin.
//!
//! For every compiled file with services this plugin produces, per service and in declaration order:
//!
//! 1. the server skeleton (`<S>Impl`, `ServeFor<S>`) followed by one placeholder method per RPC,
//! 2. the XClient wrapper (`<S>Client`, `New<S>Client`, `NewXClientFor<S>`) followed by its methods,
//! 3. the OneClient wrapper (`<S>OneClient`, `New<S>OneClient`, `NewOneClientFor<S>`) followed by its methods.
//!
//! ## Notes
//!
//! - Every method type is resolved before the first fragment is built. A missing symbol aborts the file with no
//!   output and no package declarations.
//! - A file without services is a no-op.

pub mod families;

use rpcxgen_core::conventions::{self, REQUIRED_PACKAGES};
use rpcxgen_core::naming::is_exported;

use super::errors::{GenerationError, TypePosition};
use super::fragment::{GeneratedUnit, MethodRecord, ServiceRecord};
use super::plugin::Plugin;
use crate::config::GeneratorConfig;
use crate::frontend::{CompiledFile, ResolutionContext, SymbolTable};

/// Name the plugin is registered under.
pub const PLUGIN_NAME: &str = "rpcx";

/// Generates rpcx server skeletons and client wrappers.
#[derive(Debug, Clone, Default)]
pub struct RpcxPlugin {
    config: GeneratorConfig,
}

impl RpcxPlugin {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Resolve every method of every service into records, recording type uses in `ctx`.
    fn resolve_services(
        &self,
        file: &CompiledFile,
        symbols: &SymbolTable,
        ctx: &mut ResolutionContext,
    ) -> Result<Vec<ServiceRecord>, GenerationError> {
        let mut services = Vec::with_capacity(file.services.len());
        for service in &file.services {
            let mut record = ServiceRecord::new(&service.name);
            if !is_exported(&record.exported) {
                tracing::warn!(
                    service = %service.name,
                    "service name does not start with a letter, stubs will not be exported"
                );
            }
            for method in &service.methods {
                let unresolved = |position, source| GenerationError::UnresolvedType {
                    file: file.name.clone(),
                    service: service.name.clone(),
                    method: method.name.clone(),
                    position,
                    source,
                };
                let input = symbols
                    .resolve(ctx, &method.input_type)
                    .map_err(|e| unresolved(TypePosition::Input, e))?;
                let output = symbols
                    .resolve(ctx, &method.output_type)
                    .map_err(|e| unresolved(TypePosition::Output, e))?;
                let method_record = MethodRecord::new(&method.name, input, output);
                if !is_exported(&method_record.exported) {
                    tracing::warn!(
                        service = %service.name,
                        method = %method.name,
                        "method name does not start with a letter, stub methods will not be exported"
                    );
                }
                record.methods.push(method_record);
            }
            services.push(record);
        }
        Ok(services)
    }
}

impl Plugin for RpcxPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    #[tracing::instrument(skip_all, fields(file = %file.name, services = file.services.len()))]
    fn generate(&self, file: &CompiledFile, symbols: &SymbolTable) -> Result<Option<GeneratedUnit>, GenerationError> {
        if !file.has_services() {
            tracing::debug!("no services, skipping");
            return Ok(None);
        }

        let required_packages: Vec<String> = REQUIRED_PACKAGES
            .iter()
            .map(|pkg| conventions::package_path(pkg.id, &self.config.rpcx_root))
            .collect();

        let mut ctx = ResolutionContext::new(file.import_path.clone());
        for path in &required_packages {
            ctx.reserve(path);
        }
        let services = self.resolve_services(file, symbols, &mut ctx)?;

        let mut unit = GeneratedUnit {
            required_packages,
            ..GeneratedUnit::default()
        };
        unit.fragments.push(families::provenance(&file.name));

        for service in &services {
            tracing::debug!(service = %service.raw_name, methods = service.methods.len(), "emitting service");

            unit.fragments.push(families::server_skeleton(service, &self.config));
            for method in &service.methods {
                unit.fragments.push(families::server_method(service, method));
            }

            unit.fragments.push(families::client_wrapper(service, &self.config));
            for method in &service.methods {
                unit.fragments.push(families::client_method(service, method));
            }

            unit.fragments.push(families::one_client_wrapper(service, &self.config));
            for method in &service.methods {
                unit.fragments.push(families::one_client_method(service, method));
            }
        }

        unit.required_imports = ctx.into_required_imports();
        Ok(Some(unit))
    }
}
