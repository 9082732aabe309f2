use crate::core::schema::FieldSpec;

/// Message emitted for a required field whose trimmed value is empty.
pub const REQUIRED_MESSAGE: &str = "Required";

pub type Validator = Box<dyn Fn(&str) -> ValidationResult + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn required() -> Self {
        Self::Invalid(REQUIRED_MESSAGE.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message.as_str()),
        }
    }

    /// Error-tree encoding: the empty string means no error.
    pub fn into_message(self) -> String {
        match self {
            Self::Valid => String::new(),
            Self::Invalid(message) => message,
        }
    }
}

/// Required-ness is decided before format. A required field that is blank
/// after trimming is `Required`. An optional field is skipped only when the
/// value is exactly empty; whitespace still goes through its format validator.
pub fn validate_field(spec: &FieldSpec, raw: &str) -> ValidationResult {
    if spec.required {
        if raw.trim().is_empty() {
            return ValidationResult::required();
        }
    } else if raw.is_empty() {
        return ValidationResult::Valid;
    }
    spec.run_validator(raw)
}
