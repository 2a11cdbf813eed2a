//! Model metadata, the installed-model registry and typed object access

mod meta;
mod objects;
mod registry;
mod schema;

pub use meta::{Column, ColumnKind, Model, ModelMeta, ModelObject};
pub use objects::{Objects, objects};
pub use registry::{ModelRegistry, RegisteredModel};
pub use schema::{create_table, create_tables};
