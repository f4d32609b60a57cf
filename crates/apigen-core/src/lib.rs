pub mod config;
pub mod error;
pub mod infer;
pub mod ir;
pub mod naming;

pub use error::{ConfigError, DecodeError, ModelError};
pub use infer::{QuerySet, from_json_str, from_yaml_str, infer_object, infer_query, path_record};
