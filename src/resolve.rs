//! Pure naming functions shared by every compiler stage.
//!
//! Nothing here looks at more than the value it is handed: equal inputs give
//! equal names, which is what lets callers compute a model's name in several
//! places and rely on them matching.
pub mod names;
pub mod path;
pub mod type_ref;

pub use path::{adapter_type_name, type_name};
pub use type_ref::{leaf_type_name, resolve, resolve_raw};
