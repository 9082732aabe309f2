use crate::error::FormError;
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Dotted identifier naming one leaf of the nested form record,
/// e.g. `userInfo.firstName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(invalid(input, "path is empty"));
        }

        for (idx, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(invalid(input, format!("empty segment at position {idx}")));
            }
            if let Some(ch) = segment.chars().find(|ch| !is_segment_char(*ch)) {
                return Err(invalid(
                    input,
                    format!("unexpected character '{ch}' in segment '{segment}'"),
                ));
            }
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn group(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(group, _)| group)
    }

    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(self.0.as_str())
    }

    /// True when every segment of `self` is a leading segment of `other`
    /// (or the other way round). Two such paths cannot both be leaves.
    pub fn overlaps(&self, other: &FieldPath) -> bool {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) if a == b => continue,
                (Some(_), Some(_)) => return false,
                _ => return true,
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = FormError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> FormError {
    FormError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn is_segment_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Writes `value` at `path`, creating intermediate objects as needed.
/// A non-object found on the way is replaced by an object.
pub fn insert_at_path(root: &mut Value, path: &FieldPath, value: Value) {
    let segments: Vec<&str> = path.segments().collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for key in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(leaf.to_string(), value);
    }
}

/// Reads the string leaf at `path`, if present.
pub fn get_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    let mut current = root;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    current.as_str()
}

#[cfg(test)]
mod tests {
    use super::{FieldPath, get_at_path, insert_at_path};
    use crate::error::FormError;
    use serde_json::{Value, json};

    #[test]
    fn parse_two_segment_path() {
        let path = FieldPath::parse("userInfo.firstName").expect("path should parse");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["userInfo", "firstName"]);
        assert_eq!(path.group(), Some("userInfo"));
        assert_eq!(path.leaf(), "firstName");
        assert_eq!(path.to_string(), "userInfo.firstName");
    }

    #[test]
    fn parse_rejects_empty_segments_and_brackets() {
        assert!(matches!(
            FieldPath::parse("userInfo..curp"),
            Err(FormError::InvalidPath { .. })
        ));
        assert!(matches!(
            FieldPath::parse(".curp"),
            Err(FormError::InvalidPath { .. })
        ));
        assert!(matches!(
            FieldPath::parse("rows[0].name"),
            Err(FormError::InvalidPath { .. })
        ));
        assert!(matches!(FieldPath::parse("  "), Err(FormError::InvalidPath { .. })));
    }

    #[test]
    fn overlapping_prefixes_are_detected() {
        let group = FieldPath::parse("address").expect("path");
        let leaf = FieldPath::parse("address.street").expect("path");
        let sibling = FieldPath::parse("address.state").expect("path");
        assert!(group.overlaps(&leaf));
        assert!(leaf.overlaps(&group));
        assert!(!leaf.overlaps(&sibling));
    }

    #[test]
    fn insert_creates_nested_objects() {
        let mut root = Value::Null;
        let street = FieldPath::parse("address.street").expect("path");
        let zip = FieldPath::parse("address.zipCode").expect("path");
        insert_at_path(&mut root, &street, json!("Reforma"));
        insert_at_path(&mut root, &zip, json!("06600"));

        assert_eq!(root, json!({"address": {"street": "Reforma", "zipCode": "06600"}}));
        assert_eq!(get_at_path(&root, "address.zipCode"), Some("06600"));
        assert_eq!(get_at_path(&root, "address.missing"), None);
    }

    #[test]
    fn insert_overwrites_existing_leaf() {
        let mut root = json!({"userInfo": {"rfc": "old"}});
        let rfc = FieldPath::parse("userInfo.rfc").expect("path");
        insert_at_path(&mut root, &rfc, json!("new"));
        assert_eq!(get_at_path(&root, "userInfo.rfc"), Some("new"));
    }
}
