use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use apigen_core::config::FormatterKind;

use crate::error::FormatError;

/// Turns raw generated source into its final, canonical form.
///
/// Implementations must reject text that is not syntactically valid.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

impl<F> SourceFormatter for F
where
    F: Fn(&str) -> Result<String, FormatError>,
{
    fn format(&self, source: &str) -> Result<String, FormatError> {
        self(source)
    }
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

/// Pipes the source through an external program such as `gofmt` or `goimports`.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn gofmt() -> Self {
        Self::new("gofmt", vec![])
    }

    /// `goimports` also adds the imports the generated source leaves out.
    pub fn goimports() -> Self {
        Self::new("goimports", vec![])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let spawn_err = |source| FormatError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin from another thread so a full stdout pipe cannot stall the write.
        let mut stdin = child.stdin.take();
        let input = source.to_string();
        let feeder = thread::spawn(move || match stdin.as_mut() {
            Some(stdin) => stdin.write_all(input.as_bytes()),
            None => Ok(()),
        });

        let output = child.wait_with_output().map_err(spawn_err)?;
        match feeder.join() {
            Ok(result) => result.map_err(spawn_err)?,
            Err(_) => {
                return Err(FormatError::Rejected {
                    program: self.program.clone(),
                    stderr: "stdin writer panicked".to_string(),
                });
            }
        }

        if !output.status.success() {
            return Err(FormatError::Rejected {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| FormatError::Encoding {
            program: self.program.clone(),
        })
    }
}

/// The formatter selected in the project configuration.
pub fn formatter_for(kind: FormatterKind) -> Box<dyn SourceFormatter + Send + Sync> {
    match kind {
        FormatterKind::Gofmt => Box::new(CommandFormatter::gofmt()),
        FormatterKind::Goimports => Box::new(CommandFormatter::goimports()),
        FormatterKind::None => Box::new(Passthrough),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(Passthrough.format("package main\n").unwrap(), "package main\n");
    }

    #[test]
    fn test_closure_formatter() {
        let upper = |s: &str| -> Result<String, FormatError> { Ok(s.to_uppercase()) };
        assert_eq!(upper.format("abc").unwrap(), "ABC");
    }

    #[test]
    fn test_missing_program() {
        let formatter = CommandFormatter::new("apigen-no-such-formatter", vec![]);
        let err = formatter.format("package main\n").unwrap_err();
        assert!(matches!(err, FormatError::Spawn { .. }));
    }

    #[test]
    fn test_formatter_for() {
        let formatter = formatter_for(FormatterKind::None);
        assert_eq!(formatter.format("x").unwrap(), "x");
    }
}
