use thiserror::Error;

/// A sample could not be read into the value model.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse JSON sample: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML sample: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("sample must be an object at the top level, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("method {method}: request field {field} is declared more than once")]
    FieldCollision { method: String, field: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
