//! Content types module.
//!
//! This module provides the content type registry, its synchronisation
//! helpers and the shortcut redirect view.

pub use ferrule_contenttypes::*;
