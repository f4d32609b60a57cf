use std::fmt;

use crate::type_mapper::go_quote;
use crate::writer::SourceWriter;

/// Marker recognized by Go tooling as generated code.
pub const GENERATED_MARKER: &str = "Code generated by apigen; DO NOT EDIT.";

/// Emit the file header: marker and provenance comments, package clause, runtime import.
///
/// Only the client runtime is imported; the formatter is expected to resolve the rest.
pub fn emit_header<W: fmt::Write>(
    w: &mut SourceWriter<W>,
    package: &str,
    provenance: &str,
    runtime_module: &str,
) {
    writeln!(w, "// {GENERATED_MARKER}");
    if !provenance.is_empty() {
        writeln!(w, "// {provenance}");
    }
    w.blank();
    writeln!(w, "package {package}");
    w.blank();
    w.line("import (");
    writeln!(w, "\t{}", go_quote(runtime_module));
    w.line(")");
    w.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let mut w = SourceWriter::new();
        emit_header(&mut w, "main", "github.com/ktr0731/apigen", "example.com/rt/client");
        assert_eq!(
            w.take().unwrap(),
            "// Code generated by apigen; DO NOT EDIT.\n\
             // github.com/ktr0731/apigen\n\
             \n\
             package main\n\
             \n\
             import (\n\
             \t\"example.com/rt/client\"\n\
             )\n\
             \n"
        );
    }

    #[test]
    fn test_header_without_provenance() {
        let mut w = SourceWriter::new();
        emit_header(&mut w, "api", "", "example.com/client");
        let text = w.take().unwrap();
        assert!(text.starts_with("// Code generated by apigen; DO NOT EDIT.\n\npackage api\n"));
    }
}
