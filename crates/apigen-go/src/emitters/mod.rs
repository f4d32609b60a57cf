//! Structural emitters. Each one appends to a [`SourceWriter`](crate::SourceWriter) and
//! relies on its sticky error instead of returning a `Result`.

pub mod header;
pub mod methods;
pub mod service;
pub mod types;

use minijinja::Environment;

use crate::type_mapper::go_quote;

pub const METHOD_TEMPLATE: &str = "method.go.j2";
pub const CONSTRUCTOR_TEMPLATE: &str = "constructor.go.j2";

fn go_quote_filter(value: String) -> String {
    go_quote(&value)
}

/// Template environment with every Go template loaded.
pub fn template_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("go_quote", go_quote_filter);
    env.add_template(METHOD_TEMPLATE, include_str!("../../templates/method.go.j2"))?;
    env.add_template(
        CONSTRUCTOR_TEMPLATE,
        include_str!("../../templates/constructor.go.j2"),
    )?;
    Ok(env)
}
