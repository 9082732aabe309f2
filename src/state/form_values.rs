use crate::core::field_path::{FieldPath, insert_at_path};
use crate::core::schema::FormSchema;
use indexmap::IndexMap;
use serde_json::Value;

/// Current raw value for every declared path.
///
/// Built from a schema and never grows afterwards: `set` only overwrites
/// existing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: IndexMap<FieldPath, String>,
}

impl FormValues {
    pub fn from_schema(schema: &FormSchema) -> Self {
        let values = schema
            .iter()
            .map(|(path, spec)| (path.clone(), spec.default_value.clone()))
            .collect();
        Self { values }
    }

    /// Returns false when `path` is not declared.
    pub(crate) fn set(&mut self, path: &str, value: String) -> bool {
        match self.values.get_mut(path) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.values.iter().map(|(path, value)| (path, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_nested(&self) -> Value {
        let mut root = Value::Object(Default::default());
        for (path, value) in &self.values {
            insert_at_path(&mut root, path, Value::String(value.clone()));
        }
        root
    }
}
