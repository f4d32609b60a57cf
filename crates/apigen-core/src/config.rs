use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::ir::HttpMethod;

/// Top-level project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    /// Go package name of the generated file.
    pub package: String,
    pub output: String,
    /// Comment emitted below the generated-code marker.
    pub provenance: String,
    /// Import path of the client runtime providing `Client`, `Option` and `New`.
    pub runtime_module: String,
    pub formatter: FormatterKind,
    /// Methods keyed by service name.
    pub services: IndexMap<String, Vec<MethodConfig>>,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
            output: "apigen.go".to_string(),
            provenance: DEFAULT_PROVENANCE.to_string(),
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            formatter: FormatterKind::Goimports,
            services: IndexMap::new(),
        }
    }
}

/// Which external formatter finishes the generated source.
///
/// The header only imports the client runtime, so only `goimports` yields a file that
/// compiles as is; `gofmt` checks syntax and layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    Gofmt,
    #[default]
    Goimports,
    None,
}

/// One API method and the samples it is inferred from.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodConfig {
    pub name: String,
    pub verb: HttpMethod,
    /// Request URL; `{name}` placeholders become path parameters.
    pub url: String,
    /// Sample query string, e.g. `limit=10&tag=a&tag=b`.
    #[serde(default)]
    pub query: Option<String>,
    /// Path to a sample request body (JSON or YAML), relative to the config file.
    #[serde(default)]
    pub body: Option<String>,
    /// Path to a sample response document (JSON or YAML), relative to the config file.
    #[serde(default)]
    pub response: Option<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

pub const DEFAULT_PROVENANCE: &str = "github.com/ktr0731/apigen";

pub const DEFAULT_RUNTIME_MODULE: &str = "github.com/ktr0731/apigen/client";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
package: main
output: apigen.go
formatter: goimports    # goimports | gofmt (syntax only) | none
# runtime_module: github.com/ktr0731/apigen/client

services:
  Users:
    - name: GetUser
      verb: GET
      url: https://api.example.com/users/{id}
      response: samples/user.json
    - name: ListUsers
      verb: GET
      url: https://api.example.com/users
      query: limit=10&tag=a&tag=b
      response: samples/users.json
    - name: CreateUser
      verb: POST
      url: https://api.example.com/users
      body: samples/new_user.json
      response: samples/user.json
"#
}
