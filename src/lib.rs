//! Typed client form state from server-side validation rules.
//!
//! Each schema maps `field path → rule list`. Rules are classified into a
//! type expression per field ([`mapping`]), nested by path ([`tree`]), and
//! rendered as an object type plus a matching initial value ([`emit`]).
pub mod classify;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod mapping;
pub mod path_de;
pub mod provider;
pub mod rules;
pub mod schema;
pub mod transform;
pub mod tree;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use provider::FrontEndProvider;
pub use schema::{EnumCatalog, SchemaDescriptor, SchemaDocument};
pub use transform::{SchemaResult, SchemaTransformer};
