use thiserror::Error;

/// A write into the source buffer failed. Only the first such failure of a run is kept.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write generated source: {0}")]
    Write(#[from] std::fmt::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run formatter {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter {program} rejected the generated source: {stderr}")]
    Rejected { program: String, stderr: String },

    #[error("formatter {program} produced non UTF-8 output")]
    Encoding { program: String },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("failed to write output: {0}")]
    Sink(#[from] std::io::Error),
}
