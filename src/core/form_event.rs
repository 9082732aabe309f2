use crate::core::field_path::FieldPath;

/// What a single edit changed, for hosts that re-render incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { path: FieldPath, value: String },
    ErrorRaised { path: FieldPath, message: String },
    ErrorCleared { path: FieldPath },
}
