pub mod method;
pub mod types;

pub use method::{HttpMethod, Method, Request, Service};
pub use types::{Field, Metadata, NamedType, PATH_TAG, QUERY_TAG, Record, Type, WIRE_TAG};
