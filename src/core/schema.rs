use crate::core::catalog;
use crate::core::field_path::FieldPath;
use crate::core::validation::{ValidationResult, Validator};
use crate::core::validators;
use crate::error::FormError;
use indexmap::IndexMap;
use std::fmt;

pub mod paths {
    pub const FIRST_NAME: &str = "userInfo.firstName";
    pub const MIDDLE_NAME: &str = "userInfo.middleName";
    pub const LAST_NAME: &str = "userInfo.lastName";
    pub const CURP: &str = "userInfo.curp";
    pub const RFC: &str = "userInfo.rfc";
    pub const STREET: &str = "address.street";
    pub const ZIP_CODE: &str = "address.zipCode";
    pub const EXTERNAL_NUMBER: &str = "address.externalNumber";
    pub const INTERNAL_NUMBER: &str = "address.internalNumber";
    pub const STATE: &str = "address.state";
    pub const PROVINCE: &str = "address.province";
    pub const NEIGHBORHOOD: &str = "address.neighborhood";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub struct FieldSpec {
    pub label: String,
    pub required: bool,
    pub default_value: String,
    pub options: Vec<FieldOption>,
    validator: Validator,
}

impl FieldSpec {
    pub fn required(label: impl Into<String>) -> Self {
        Self::new(label, true)
    }

    pub fn optional(label: impl Into<String>) -> Self {
        Self::new(label, false)
    }

    fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            required,
            default_value: String::new(),
            options: Vec::new(),
            validator: validators::any(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn run_validator(&self, raw: &str) -> ValidationResult {
        (self.validator)(raw)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("label", &self.label)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}

/// Static, ordered set of field paths and their specs.
#[derive(Debug, Default)]
pub struct FormSchema {
    fields: IndexMap<FieldPath, FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, path: &str, spec: FieldSpec) -> Result<Self, FormError> {
        self.declare(path, spec)?;
        Ok(self)
    }

    pub fn declare(&mut self, path: &str, spec: FieldSpec) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        if self.fields.contains_key(&path) {
            return Err(FormError::DuplicatePath(path.to_string()));
        }
        if let Some(existing) = self.fields.keys().find(|existing| existing.overlaps(&path)) {
            return Err(FormError::ConflictingPath {
                path: path.to_string(),
                existing: existing.to_string(),
            });
        }
        self.fields.insert(path, spec);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FieldSpec> {
        self.fields.get(path)
    }

    pub fn entry(&self, path: &str) -> Option<(&FieldPath, &FieldSpec)> {
        self.fields.get_key_value(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldSpec)> {
        self.fields.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The personal data + address form.
pub fn identification_schema() -> Result<FormSchema, FormError> {
    FormSchema::new()
        .with_field(
            paths::FIRST_NAME,
            FieldSpec::required("Nombre").with_validator(validators::letters_only()),
        )?
        .with_field(
            paths::MIDDLE_NAME,
            FieldSpec::required("Primer Apellido").with_validator(validators::letters_only()),
        )?
        .with_field(
            paths::LAST_NAME,
            FieldSpec::optional("Segundo Apellido").with_validator(validators::letters_only()),
        )?
        .with_field(
            paths::CURP,
            FieldSpec::required("CURP").with_validator(validators::curp()),
        )?
        .with_field(
            paths::RFC,
            FieldSpec::required("RFC").with_validator(validators::rfc()),
        )?
        .with_field(paths::STREET, FieldSpec::required("Street"))?
        .with_field(
            paths::ZIP_CODE,
            FieldSpec::required("Postal Code").with_validator(validators::digits_up_to(5)),
        )?
        .with_field(
            paths::EXTERNAL_NUMBER,
            FieldSpec::required("External Number").with_validator(validators::digits_up_to(5)),
        )?
        .with_field(
            paths::INTERNAL_NUMBER,
            FieldSpec::optional("Internal Number")
                .with_validator(validators::alphanumeric_up_to(10)),
        )?
        .with_field(
            paths::STATE,
            FieldSpec::required("State").with_options(catalog::state_options()),
        )?
        .with_field(
            paths::PROVINCE,
            FieldSpec::required("Province").with_validator(validators::letters_only()),
        )?
        .with_field(
            paths::NEIGHBORHOOD,
            FieldSpec::required("Neighborhood").with_validator(validators::letters_only()),
        )
}
