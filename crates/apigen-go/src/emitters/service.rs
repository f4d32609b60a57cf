use std::fmt;
use std::sync::Arc;

use apigen_core::ir::{Field, NamedType, Record, Service, Type};
use minijinja::{Environment, context};

use super::CONSTRUCTOR_TEMPLATE;
use super::types::TypeDeclarations;
use crate::type_mapper::package_name;
use crate::writer::SourceWriter;

/// Name of the transport type exported by the client runtime.
pub const RUNTIME_CLIENT_TYPE: &str = "Client";

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Imported packages and predeclared identifiers the generated file refers to.
const FILE_SCOPE_NAMES: &[&str] = &[
    "context", "fmt", "url", "bool", "error", "float64", "nil", "string",
];

/// Name of the unexported struct implementing `service`.
///
/// The camel-case service name gets a `Service` suffix when it would shadow a keyword, an
/// imported package or a predeclared identifier used by the generated code.
pub fn impl_name(service: &Service, runtime_module: &str) -> String {
    let name = service.name.camel_case.as_str();
    if GO_KEYWORDS.contains(&name)
        || FILE_SCOPE_NAMES.contains(&name)
        || name == package_name(runtime_module)
    {
        format!("{name}Service")
    } else {
        name.to_string()
    }
}

/// Emit the service interface, one signature per method in the given order.
pub fn emit_interface<W: fmt::Write>(w: &mut SourceWriter<W>, service: &Service) {
    writeln!(w, "type {} interface {{", service.name.pascal_case);
    for method in &service.methods {
        writeln!(
            w,
            "\t{}(ctx context.Context, req *{}) (*{}, error)",
            method.name.pascal_case,
            method.request_type_name(),
            method.response_type_name()
        );
    }
    w.line("}");
    w.blank();
}

/// The unexported struct implementing a service, holding the runtime transport.
pub fn client_struct(service: &Service, runtime_module: &str) -> NamedType {
    let transport = NamedType::external(runtime_module, RUNTIME_CLIENT_TYPE).nullable();
    NamedType::new(
        impl_name(service, runtime_module),
        Type::Record(Record::sorted(vec![Field::new(
            "client",
            "client",
            Type::named(transport),
        )])),
    )
}

/// Emit the implementing struct through the type declarations of this run.
pub fn emit_client_struct<W: fmt::Write>(
    w: &mut SourceWriter<W>,
    decls: &mut TypeDeclarations,
    service: &Service,
    runtime_module: &str,
) {
    decls.declare(w, &Arc::new(client_struct(service, runtime_module)));
}

/// Emit `New<Service>(opts ...Option)` returning the implementing struct.
pub fn emit_constructor<W: fmt::Write>(
    w: &mut SourceWriter<W>,
    env: &Environment<'_>,
    service: &Service,
    runtime_module: &str,
) {
    w.render(
        env,
        CONSTRUCTOR_TEMPLATE,
        context! {
            interface_name => service.name.pascal_case.clone(),
            impl_name => impl_name(service, runtime_module),
            runtime_package => package_name(runtime_module),
        },
    );
    w.blank();
}
