use crate::core::field_path::{FieldPath, insert_at_path};
use crate::core::schema::FormSchema;
use crate::core::validation::ValidationResult;
use indexmap::IndexMap;
use serde_json::Value;

/// Latest validation message per declared path; the empty string means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    entries: IndexMap<FieldPath, String>,
}

impl ErrorTree {
    pub fn from_schema(schema: &FormSchema) -> Self {
        let entries = schema
            .paths()
            .map(|path| (path.clone(), String::new()))
            .collect();
        Self { entries }
    }

    /// Returns the previous message when it changed, `None` otherwise
    /// (including when `path` is not declared).
    pub(crate) fn record(&mut self, path: &str, result: ValidationResult) -> Option<String> {
        let slot = self.entries.get_mut(path)?;
        let message = result.into_message();
        if *slot == message {
            return None;
        }
        Some(std::mem::replace(slot, message))
    }

    pub fn message(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn error(&self, path: &str) -> Option<&str> {
        self.message(path).filter(|message| !message.is_empty())
    }

    pub fn is_clean(&self) -> bool {
        self.entries.values().all(String::is_empty)
    }

    pub fn first_error(&self) -> Option<(&FieldPath, &str)> {
        self.errors().next()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.entries
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(path, message)| (path, message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.entries
            .iter()
            .map(|(path, message)| (path, message.as_str()))
    }

    pub fn to_nested(&self) -> Value {
        let mut root = Value::Object(Default::default());
        for (path, message) in &self.entries {
            insert_at_path(&mut root, path, Value::String(message.clone()));
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorTree;
    use crate::core::schema::{FieldSpec, FormSchema};
    use crate::core::validation::ValidationResult;
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::new()
            .with_field("userInfo.curp", FieldSpec::required("CURP"))
            .and_then(|s| s.with_field("address.street", FieldSpec::required("Street")))
            .expect("schema")
    }

    #[test]
    fn record_reports_only_changes() {
        let mut tree = ErrorTree::from_schema(&schema());
        assert!(tree.is_clean());

        let previous = tree.record("userInfo.curp", ValidationResult::invalid("Invalid CURP"));
        assert_eq!(previous.as_deref(), Some(""));
        assert!(!tree.is_clean());

        let unchanged = tree.record("userInfo.curp", ValidationResult::invalid("Invalid CURP"));
        assert_eq!(unchanged, None);

        assert_eq!(tree.record("missing.path", ValidationResult::Valid), None);
        assert_eq!(tree.message("missing.path"), None);
    }

    #[test]
    fn nested_view_mirrors_value_shape() {
        let mut tree = ErrorTree::from_schema(&schema());
        tree.record("address.street", ValidationResult::required());
        assert_eq!(
            tree.to_nested(),
            json!({"userInfo": {"curp": ""}, "address": {"street": "Required"}})
        );
        let (path, message) = tree.first_error().expect("one error");
        assert_eq!(path.as_str(), "address.street");
        assert_eq!(message, "Required");
    }
}
