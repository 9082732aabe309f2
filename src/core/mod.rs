pub mod catalog;
pub mod field_path;
pub mod form_engine;
pub mod form_event;
pub mod schema;
pub mod snapshot;
pub mod validation;
pub mod validators;

pub use field_path::FieldPath;
