//! Database connections, routers and model metadata.

pub use ferrule_db::*;
