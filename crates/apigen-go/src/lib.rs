pub mod emitters;
pub mod error;
pub mod format;
pub mod generator;
pub mod type_mapper;
pub mod writer;

pub use error::{EmitError, FormatError, GenerateError};
pub use format::{CommandFormatter, Passthrough, SourceFormatter};
pub use generator::{GeneratorOptions, GoClientGenerator};
pub use writer::SourceWriter;
