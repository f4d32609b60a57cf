use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use apigen_core::config::{ApigenConfig, DEFAULT_PROVENANCE, DEFAULT_RUNTIME_MODULE};
use apigen_core::ir::{Method, NamedType, Service, Type};
use apigen_core::naming::normalize_name;

use crate::emitters::header::emit_header;
use crate::emitters::methods::emit_method;
use crate::emitters::service::{emit_client_struct, emit_constructor, emit_interface, impl_name};
use crate::emitters::template_env;
use crate::emitters::types::TypeDeclarations;
use crate::error::{EmitError, GenerateError};
use crate::format::SourceFormatter;
use crate::writer::SourceWriter;

/// Settings of the emitted compilation unit.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub package: String,
    pub provenance: String,
    /// Import path of the client runtime providing `Client`, `Option` and `New`.
    pub runtime_module: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
            provenance: DEFAULT_PROVENANCE.to_string(),
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
        }
    }
}

impl From<&ApigenConfig> for GeneratorOptions {
    fn from(config: &ApigenConfig) -> Self {
        Self {
            package: config.package.clone(),
            provenance: config.provenance.clone(),
            runtime_module: config.runtime_module.clone(),
        }
    }
}

/// Go client generator: collects methods per service, then emits one source file.
///
/// `register` may be called from several threads. Every registration must have finished
/// before `render` or `generate` is called; the output is only defined for a complete registry.
pub struct GoClientGenerator {
    options: GeneratorOptions,
    services: Mutex<HashMap<String, Vec<Method>>>,
}

impl GoClientGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            services: Mutex::new(HashMap::new()),
        }
    }

    /// Add `method` to `service`.
    pub fn register(&self, service: &str, method: Method) {
        log::debug!("registering {}.{}", service, method.name);
        self.services
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(service.to_string())
            .or_default()
            .push(method);
    }

    /// Registered services sorted by name, each with its methods sorted by name.
    pub fn services(&self) -> Vec<Service> {
        let registry = self.services.lock().unwrap_or_else(PoisonError::into_inner);

        let mut services: Vec<Service> = registry
            .iter()
            .map(|(name, methods)| {
                let mut methods = methods.clone();
                methods.sort_by(|a, b| a.name.pascal_case.cmp(&b.name.pascal_case));
                for pair in methods.windows(2) {
                    if pair[0].name.pascal_case == pair[1].name.pascal_case {
                        log::warn!(
                            "service {} has more than one method named {}",
                            name,
                            pair[0].name.pascal_case
                        );
                    }
                }
                Service {
                    name: normalize_name(name),
                    methods,
                }
            })
            .collect();
        services.sort_by(|a, b| a.name.original.cmp(&b.name.original));
        services
    }

    /// Emit the whole file into `w`.
    pub fn emit<W: fmt::Write>(&self, w: &mut SourceWriter<W>) {
        let env = match template_env() {
            Ok(env) => env,
            Err(err) => {
                w.fail(err.into());
                return;
            }
        };
        let opts = &self.options;

        emit_header(w, &opts.package, &opts.provenance, &opts.runtime_module);

        let mut decls = TypeDeclarations::new();
        for service in self.services() {
            emit_interface(w, &service);
            emit_client_struct(w, &mut decls, &service, &opts.runtime_module);
            emit_constructor(w, &env, &service, &opts.runtime_module);

            let impl_name = impl_name(&service, &opts.runtime_module);
            for method in &service.methods {
                emit_method(w, &env, &impl_name, method);
            }

            for method in &service.methods {
                let request = NamedType::new(
                    method.request_type_name(),
                    Type::Record(method.request.to_flat_record()),
                );
                decls.declare(w, &Arc::new(request));

                let response =
                    NamedType::new(method.response_type_name(), method.response.clone());
                decls.declare(w, &Arc::new(response));
            }
        }
    }

    /// Unformatted source of the registered services.
    pub fn render(&self) -> Result<String, EmitError> {
        let mut w = SourceWriter::new();
        self.emit(&mut w);
        w.take()
    }

    /// Render, format and write the final source to `out`.
    ///
    /// Nothing is written to `out` unless rendering and formatting both succeed.
    pub fn generate(
        &self,
        formatter: &dyn SourceFormatter,
        out: &mut dyn io::Write,
    ) -> Result<(), GenerateError> {
        let source = self.render()?;
        log::debug!("rendered {} bytes of Go source", source.len());

        let formatted = formatter.format(&source)?;
        out.write_all(formatted.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl Default for GoClientGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}
