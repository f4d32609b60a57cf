use std::fmt;

use apigen_core::infer::{path_arguments, url_format};
use apigen_core::ir::Method;
use minijinja::{Environment, context};

use super::METHOD_TEMPLATE;
use crate::writer::SourceWriter;

/// Emit the body of one method of the struct `impl_name`.
///
/// Query fields are encoded with `url.Values`; a single value is wrapped in a one-element
/// slice, a list field is passed as is. Each placeholder of the URL template is filled with
/// its path-escaped field, repeated placeholders once per occurrence.
pub fn emit_method<W: fmt::Write>(
    w: &mut SourceWriter<W>,
    env: &Environment<'_>,
    impl_name: &str,
    method: &Method,
) {
    let query_fields: Vec<minijinja::Value> = method
        .request
        .query_fields()
        .iter()
        .map(|field| {
            context! {
                key => field.wire_key.clone(),
                name => field.name.clone(),
                is_list => field.is_list(),
            }
        })
        .collect();

    let path_args = if method.request.path.is_some() {
        path_arguments(&method.url_template)
    } else {
        Vec::new()
    };
    let query_separator = if method.url_template.contains('?') {
        "&"
    } else {
        "?"
    };

    w.render(
        env,
        METHOD_TEMPLATE,
        context! {
            impl_name => impl_name,
            method_name => method.name.pascal_case.clone(),
            request_type => method.request_type_name(),
            response_type => method.response_type_name(),
            verb => method.verb.as_str(),
            url => method.url_template.clone(),
            url_format => url_format(&method.url_template),
            path_args => path_args,
            query_fields => query_fields,
            query_separator => query_separator,
            has_body => method.request.has_body(),
        },
    );
    w.blank();
}
