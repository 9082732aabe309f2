pub mod error_tree;
pub mod form_values;

pub use error_tree::ErrorTree;
pub use form_values::FormValues;
