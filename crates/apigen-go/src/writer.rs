use std::fmt;

use minijinja::Environment;

use crate::error::EmitError;

/// Append-only source buffer with a sticky error.
///
/// The first failed write is recorded and every later write becomes a no-op, so a run ends
/// with either the complete text or exactly one error. `writeln!` works directly on a
/// `SourceWriter` and never needs its result checked; call [`SourceWriter::take`] once at the end.
pub struct SourceWriter<W = String> {
    sink: W,
    error: Option<EmitError>,
}

impl SourceWriter<String> {
    pub fn new() -> Self {
        Self::with_sink(String::new())
    }
}

impl Default for SourceWriter<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: fmt::Write> SourceWriter<W> {
    pub fn with_sink(sink: W) -> Self {
        Self { sink, error: None }
    }

    /// Write formatted text. Called by `write!`/`writeln!`.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_fmt(args) {
            self.fail(err.into());
        }
    }

    pub fn write_str(&mut self, s: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_str(s) {
            self.fail(err.into());
        }
    }

    /// Write `s` followed by a newline.
    pub fn line(&mut self, s: &str) {
        self.write_fmt(format_args!("{s}\n"));
    }

    pub fn blank(&mut self) {
        self.write_str("\n");
    }

    /// Render a template from `env` and append the output.
    pub fn render(&mut self, env: &Environment<'_>, name: &str, ctx: minijinja::Value) {
        if self.error.is_some() {
            return;
        }
        let rendered = env.get_template(name).and_then(|tmpl| tmpl.render(ctx));
        match rendered {
            Ok(text) => self.write_str(&text),
            Err(err) => self.fail(err.into()),
        }
    }

    /// Record `err` unless an earlier error is already recorded.
    pub fn fail(&mut self, err: EmitError) {
        if self.error.is_none() {
            log::debug!("source writer failed, suppressing further output: {err}");
            self.error = Some(err);
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Finish the run: the written sink, or the first error. A failed run's text is dropped.
    pub fn take(self) -> Result<W, EmitError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.sink),
        }
    }
}
