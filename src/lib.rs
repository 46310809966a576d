//! Compile a constrained JSON-Schema-like object description into a
//! TypeScript `export interface` declaration.
//!
//! ```ignore
//! let schema = schema_iface::Schema::from_json_str(src)?;
//! let generated = schema_iface::generate("User", &schema)?;
//! println!("{}", generated.source);
//! ```
pub mod codegen;
pub mod error;
pub mod jq_exec;
pub mod path;
pub mod path_de;
pub mod schema;

pub use codegen::{generate, Codegen, Generated, RelationTable};
pub use error::{GenerateError, LoadError};
pub use path::PropertyPath;
pub use schema::{EnumValues, ForeignKeyType, Properties, Property, PropertyType, Schema, TypeDecl};
