use crate::core::field_path::FieldPath;
use crate::core::form_event::FormEvent;
use crate::core::schema::{FieldOption, FieldSpec, FormSchema, identification_schema};
use crate::core::snapshot::FormSnapshot;
use crate::core::validation;
use crate::error::FormError;
use crate::state::error_tree::ErrorTree;
use crate::state::form_values::FormValues;
use serde_json::Value;
use tracing::warn;

/// Read-only view of one field for display.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub path: &'a FieldPath,
    pub label: &'a str,
    pub required: bool,
    pub value: &'a str,
    pub message: &'a str,
    pub options: &'a [FieldOption],
}

impl FieldView<'_> {
    pub fn has_error(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Owns the form values and their error tree. Every value write is paired
/// with a re-validation of the same path, so the error tree is never stale.
#[derive(Debug)]
pub struct FormEngine {
    schema: FormSchema,
    values: FormValues,
    errors: ErrorTree,
}

impl FormEngine {
    pub fn new(schema: FormSchema) -> Self {
        let values = FormValues::from_schema(&schema);
        let errors = ErrorTree::from_schema(&schema);
        let mut engine = Self {
            schema,
            values,
            errors,
        };
        engine.revalidate_all();
        engine
    }

    pub fn identification() -> Result<Self, FormError> {
        Ok(Self::new(identification_schema()?))
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Writes `raw` into `path` and re-validates that path only.
    pub fn set_field(
        &mut self,
        path: &str,
        raw: impl Into<String>,
    ) -> Result<Vec<FormEvent>, FormError> {
        let Some((field_path, spec)) = self.schema.entry(path) else {
            warn!(path, "set_field on undeclared path");
            return Err(FormError::UnknownPath(path.to_string()));
        };

        let raw = raw.into();
        let result = validation::validate_field(spec, &raw);
        let field_path = field_path.clone();

        let mut events = Vec::new();
        if self.values.get(path) != Some(raw.as_str()) {
            events.push(FormEvent::ValueChanged {
                path: field_path.clone(),
                value: raw.clone(),
            });
        }
        self.values.set(path, raw);

        let message = result.message().map(str::to_string);
        if self.errors.record(path, result).is_some() {
            events.push(match message {
                Some(message) => FormEvent::ErrorRaised {
                    path: field_path,
                    message,
                },
                None => FormEvent::ErrorCleared { path: field_path },
            });
        }

        Ok(events)
    }

    pub fn value(&self, path: &str) -> Result<&str, FormError> {
        self.values
            .get(path)
            .ok_or_else(|| FormError::UnknownPath(path.to_string()))
    }

    /// `Ok(None)` when the path is currently valid.
    pub fn error(&self, path: &str) -> Result<Option<&str>, FormError> {
        if !self.schema.contains(path) {
            return Err(FormError::UnknownPath(path.to_string()));
        }
        Ok(self.errors.error(path))
    }

    pub fn field(&self, path: &str) -> Result<FieldView<'_>, FormError> {
        let (field_path, spec) = self
            .schema
            .entry(path)
            .ok_or_else(|| FormError::UnknownPath(path.to_string()))?;
        Ok(self.view(field_path, spec))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> {
        self.schema.iter().map(|(path, spec)| self.view(path, spec))
    }

    /// True iff no declared path holds an error. Computed on every call.
    pub fn is_submittable(&self) -> bool {
        self.errors.is_clean()
    }

    pub fn first_error(&self) -> Option<(&FieldPath, &str)> {
        self.errors.first_error()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(self.values.to_nested())
    }

    pub fn errors_nested(&self) -> Value {
        self.errors.to_nested()
    }

    /// Restores every default value and replaces all prior messages with the
    /// validation of those defaults. Messages are not blanked: after a reset
    /// every required field without a default reads `Required`, so a reset
    /// form is not submittable.
    pub fn reset(&mut self) {
        self.values = FormValues::from_schema(&self.schema);
        self.errors = ErrorTree::from_schema(&self.schema);
        self.revalidate_all();
    }

    fn revalidate_all(&mut self) {
        for (path, spec) in self.schema.iter() {
            let raw = self.values.get(path.as_str()).unwrap_or_default();
            let result = validation::validate_field(spec, raw);
            self.errors.record(path.as_str(), result);
        }
    }

    fn view<'a>(&'a self, path: &'a FieldPath, spec: &'a FieldSpec) -> FieldView<'a> {
        FieldView {
            path,
            label: spec.label.as_str(),
            required: spec.required,
            value: self.values.get(path.as_str()).unwrap_or_default(),
            message: self.errors.message(path.as_str()).unwrap_or_default(),
            options: spec.options.as_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FormEngine;
    use crate::core::form_event::FormEvent;
    use crate::core::schema::paths;
    use crate::core::snapshot::IdentificationPayload;
    use crate::error::FormError;

    const VALID: &[(&str, &str)] = &[
        (paths::FIRST_NAME, "Guadalupe"),
        (paths::MIDDLE_NAME, "Gomez"),
        (paths::CURP, "GODE561231HDFRRN09"),
        (paths::RFC, "GODE561231GR8"),
        (paths::STREET, "Av. Reforma 222"),
        (paths::ZIP_CODE, "06600"),
        (paths::EXTERNAL_NUMBER, "222"),
        (paths::STATE, "DF"),
        (paths::PROVINCE, "Cuauhtemoc"),
        (paths::NEIGHBORHOOD, "Juarez"),
    ];

    fn engine() -> FormEngine {
        FormEngine::identification().expect("identification schema")
    }

    fn filled() -> FormEngine {
        let mut engine = engine();
        for (path, value) in VALID {
            engine.set_field(path, *value).expect("declared path");
        }
        engine
    }

    #[test]
    fn fresh_form_marks_required_fields() {
        let engine = engine();
        assert!(!engine.is_submittable());
        assert_eq!(engine.error(paths::FIRST_NAME), Ok(Some("Required")));
        assert_eq!(engine.error(paths::LAST_NAME), Ok(None));
        assert_eq!(engine.error(paths::INTERNAL_NUMBER), Ok(None));
        assert_eq!(engine.errors().errors().count(), 10);
    }

    #[test]
    fn every_required_field_reports_required_when_emptied() {
        let mut engine = filled();
        let required: Vec<String> = engine
            .schema()
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(path, _)| path.to_string())
            .collect();
        for path in required {
            engine.set_field(&path, "  ").expect("declared path");
            assert_eq!(engine.error(&path), Ok(Some("Required")), "{path}");
        }
    }

    #[test]
    fn optional_fields_accept_empty() {
        let mut engine = filled();
        engine.set_field(paths::LAST_NAME, "").expect("declared path");
        engine.set_field(paths::INTERNAL_NUMBER, "").expect("declared path");
        assert_eq!(engine.error(paths::LAST_NAME), Ok(None));
        assert_eq!(engine.error(paths::INTERNAL_NUMBER), Ok(None));
        assert!(engine.is_submittable());
    }

    #[test]
    fn optional_fields_reject_whitespace_only() {
        let mut engine = filled();
        engine.set_field(paths::LAST_NAME, "   ").expect("declared path");
        engine.set_field(paths::INTERNAL_NUMBER, "   ").expect("declared path");
        assert_eq!(
            engine.error(paths::LAST_NAME),
            Ok(Some("Only letters are allowed"))
        );
        assert_eq!(
            engine.error(paths::INTERNAL_NUMBER),
            Ok(Some(
                "Only numbers and letters are allowed less than 10 characters"
            ))
        );
        assert!(!engine.is_submittable());
    }

    #[test]
    fn invalid_curp_blocks_submission() {
        let mut engine = engine();
        engine.set_field(paths::CURP, "XXXX").expect("declared path");
        assert_eq!(engine.error(paths::CURP), Ok(Some("Invalid CURP")));
        assert!(!engine.is_submittable());
    }

    #[test]
    fn all_required_valid_with_optionals_empty_is_submittable() {
        let engine = filled();
        assert_eq!(engine.value(paths::LAST_NAME), Ok(""));
        assert_eq!(engine.value(paths::INTERNAL_NUMBER), Ok(""));
        assert!(engine.is_submittable());
        assert!(engine.first_error().is_none());
    }

    #[test]
    fn zip_code_is_bounded_to_five_digits() {
        let mut engine = engine();
        engine.set_field(paths::ZIP_CODE, "123456").expect("declared path");
        assert_eq!(
            engine.error(paths::ZIP_CODE),
            Ok(Some("Only numbers are allowed less than 5 digits"))
        );
        engine.set_field(paths::ZIP_CODE, "12345").expect("declared path");
        assert_eq!(engine.error(paths::ZIP_CODE), Ok(None));
    }

    #[test]
    fn submittability_flips_with_a_single_field() {
        let mut engine = filled();
        assert!(engine.is_submittable());

        engine.set_field(paths::RFC, "nope").expect("declared path");
        assert!(!engine.is_submittable());
        let (path, message) = engine.first_error().expect("rfc error");
        assert_eq!(path.as_str(), paths::RFC);
        assert_eq!(message, "Invalid RFC");

        engine.set_field(paths::ZIP_CODE, "x").expect("declared path");
        engine.set_field(paths::RFC, "GODE561231GR8").expect("declared path");
        assert!(!engine.is_submittable());

        engine.set_field(paths::ZIP_CODE, "06600").expect("declared path");
        assert!(engine.is_submittable());
    }

    #[test]
    fn edit_touches_only_its_own_path() {
        let mut engine = engine();
        engine.set_field(paths::STREET, "Insurgentes").expect("declared path");
        let values_before = engine.values().clone();
        let errors_before = engine.errors().clone();

        engine.set_field(paths::CURP, "bad").expect("declared path");

        for (path, value) in engine.values().iter() {
            if path.as_str() != paths::CURP {
                assert_eq!(values_before.get(path.as_str()), Some(value), "{path}");
            }
        }
        for (path, message) in engine.errors().iter() {
            if path.as_str() != paths::CURP {
                assert_eq!(errors_before.message(path.as_str()), Some(message), "{path}");
            }
        }
        assert_eq!(engine.value(paths::CURP), Ok("bad"));
    }

    #[test]
    fn unknown_path_is_rejected_without_side_effects() {
        let mut engine = engine();
        let before = engine.values().clone();
        let result = engine.set_field("userInfo.nickname", "Lupe");
        assert_eq!(
            result,
            Err(FormError::UnknownPath("userInfo.nickname".to_string()))
        );
        assert_eq!(engine.values(), &before);
        assert!(engine.field("address.country").is_err());
    }

    #[test]
    fn set_field_reports_value_and_error_transitions() {
        let mut engine = engine();
        let events = engine.set_field(paths::FIRST_NAME, "Ana1").expect("declared path");
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], FormEvent::ValueChanged { value, .. } if value == "Ana1"));
        assert!(matches!(
            &events[1],
            FormEvent::ErrorRaised { message, .. } if message == "Only letters are allowed"
        ));

        let events = engine.set_field(paths::FIRST_NAME, "Ana").expect("declared path");
        assert!(matches!(events.last(), Some(FormEvent::ErrorCleared { .. })));

        let events = engine.set_field(paths::FIRST_NAME, "Ana").expect("declared path");
        assert!(events.is_empty());
    }

    #[test]
    fn snapshot_rebuilds_nested_payload() {
        let engine = filled();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.get(paths::ZIP_CODE), Some("06600"));

        let payload = IdentificationPayload::try_from(&snapshot).expect("payload");
        assert_eq!(payload.user_info.first_name, "Guadalupe");
        assert_eq!(payload.user_info.last_name, "");
        assert_eq!(payload.address.state, "DF");

        let json = snapshot.as_json();
        assert_eq!(json["userInfo"]["curp"], "GODE561231HDFRRN09");
        assert_eq!(json["address"]["externalNumber"], "222");
    }

    #[test]
    fn reset_restores_defaults_and_revalidates() {
        let mut engine = filled();
        assert!(engine.is_submittable());
        engine.reset();
        assert_eq!(engine.value(paths::FIRST_NAME), Ok(""));
        assert_eq!(engine.error(paths::FIRST_NAME), Ok(Some("Required")));
        assert_eq!(engine.error(paths::LAST_NAME), Ok(None));
        assert!(!engine.is_submittable());
    }

    #[test]
    fn field_view_exposes_display_data() {
        let mut engine = engine();
        engine.set_field(paths::ZIP_CODE, "12a").expect("declared path");
        let view = engine.field(paths::ZIP_CODE).expect("declared path");
        assert_eq!(view.label, "Postal Code");
        assert!(view.required);
        assert_eq!(view.value, "12a");
        assert!(view.has_error());

        let state = engine.field(paths::STATE).expect("declared path");
        assert_eq!(state.options.len(), 16);
        assert_eq!(engine.fields().count(), 12);
    }
}
