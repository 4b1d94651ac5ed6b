//! Typed values exchanged with the path engine.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::catalog::{Shape, ValueKind};
use crate::error::PathError;

/// A leaf value to assign, or one read back from a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Text value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// Binary value.
    Bytes(Vec<u8>),
    /// List of strings.
    StringList(Vec<String>),
    /// Structured extension data.
    Opaque(serde_json::Value),
}

impl PropertyValue {
    /// Kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Bool(_) => ValueKind::Bool,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::StringList(_) => ValueKind::StringList,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Convert command-line text into a value for a target of shape `target`.
    ///
    /// Booleans accept the usual spellings (`1`, `t`, `true`, `0`, `f`,
    /// `false`, ...). Bytes are base64-decoded unless `raw_bytes` is set, in
    /// which case the UTF-8 bytes of `raw` are used verbatim. String lists are
    /// comma-separated. Opaque data is parsed as YAML and falls back to a
    /// plain string.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::TypeMismatch`] when `raw` cannot be read as the
    /// target kind, or when the target is a record or map.
    pub fn from_raw(
        target: &Shape,
        path: &str,
        raw: &str,
        raw_bytes: bool,
    ) -> Result<Self, PathError> {
        let mismatch = |actual: String| PathError::TypeMismatch {
            path: path.to_owned(),
            expected: target.describe(),
            actual,
        };

        let Some(kind) = target.value_kind() else {
            return Err(mismatch(format!("text value '{raw}'")));
        };

        match kind {
            ValueKind::String => Ok(Self::String(raw.to_owned())),
            ValueKind::Bool => parse_bool(raw)
                .map(Self::Bool)
                .ok_or_else(|| mismatch(format!("'{raw}'"))),
            ValueKind::Bytes if raw_bytes => Ok(Self::Bytes(raw.as_bytes().to_vec())),
            ValueKind::Bytes => STANDARD
                .decode(raw)
                .map(Self::Bytes)
                .map_err(|e| mismatch(format!("invalid base64 ({e})"))),
            ValueKind::StringList => Ok(Self::StringList(
                raw.split(',').map(str::to_owned).collect(),
            )),
            ValueKind::Opaque => Ok(Self::Opaque(
                serde_yaml::from_str::<serde_json::Value>(raw)
                    .unwrap_or_else(|_| serde_json::Value::String(raw.to_owned())),
            )),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Bytes(bytes) => f.write_str(&STANDARD.encode(bytes)),
            Self::StringList(items) => f.write_str(&items.join(",")),
            Self::Opaque(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Opaque(value)
    }
}

/// What a `get` found at a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A leaf value.
    Value(PropertyValue),
    /// A record or map, rendered as structured data.
    Tree(serde_json::Value),
}

impl Property {
    /// The leaf value, if this is a leaf.
    #[must_use]
    pub fn as_value(&self) -> Option<&PropertyValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Tree(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::catalog::{BOOL, BYTES, CATALOG, OPAQUE, STRING, STRING_LIST};

    #[test]
    fn test_from_raw_string() {
        let v = PropertyValue::from_raw(&STRING, "current-context", "dev", false).unwrap();
        assert_eq!(v, PropertyValue::String("dev".to_owned()));
    }

    #[test]
    fn test_from_raw_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(
                PropertyValue::from_raw(&BOOL, "p", raw, false).unwrap(),
                PropertyValue::Bool(true)
            );
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(
                PropertyValue::from_raw(&BOOL, "p", raw, false).unwrap(),
                PropertyValue::Bool(false)
            );
        }
    }

    #[test]
    fn test_from_raw_bool_rejects_garbage() {
        let err = PropertyValue::from_raw(&BOOL, "preferences.colors", "yes", false).unwrap_err();
        assert!(matches!(
            err,
            PathError::TypeMismatch { ref path, ref expected, .. }
                if path == "preferences.colors" && expected == "boolean"
        ));
    }

    #[test]
    fn test_from_raw_bytes_base64() {
        let v = PropertyValue::from_raw(&BYTES, "p", "aGVsbG8=", false).unwrap();
        assert_eq!(v, PropertyValue::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn test_from_raw_bytes_raw() {
        let v = PropertyValue::from_raw(&BYTES, "p", "aGVsbG8=", true).unwrap();
        assert_eq!(v, PropertyValue::Bytes(b"aGVsbG8=".to_vec()));
    }

    #[test]
    fn test_from_raw_bytes_invalid_base64() {
        let err = PropertyValue::from_raw(&BYTES, "p", "not base64!", false).unwrap_err();
        assert!(matches!(err, PathError::TypeMismatch { .. }));
    }

    #[test]
    fn test_from_raw_string_list() {
        let v = PropertyValue::from_raw(&STRING_LIST, "p", "a,b,c", false).unwrap();
        assert_eq!(
            v,
            PropertyValue::StringList(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn test_from_raw_opaque() {
        let v = PropertyValue::from_raw(&OPAQUE, "p", "{mode: fast, level: 3}", false).unwrap();
        assert_eq!(
            v,
            PropertyValue::Opaque(serde_json::json!({"mode": "fast", "level": 3}))
        );

        let v = PropertyValue::from_raw(&OPAQUE, "p", "key: [unclosed", false).unwrap();
        assert_eq!(
            v,
            PropertyValue::Opaque(serde_json::Value::String("key: [unclosed".to_owned()))
        );
    }

    #[test]
    fn test_from_raw_into_record_is_mismatch() {
        let err = PropertyValue::from_raw(&CATALOG, "", "x", false).unwrap_err();
        assert!(matches!(
            err,
            PathError::TypeMismatch { ref expected, .. } if expected == "record"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Bool(true).to_string(), "true");
        assert_eq!(PropertyValue::Bytes(b"hello".to_vec()).to_string(), "aGVsbG8=");
        assert_eq!(
            PropertyValue::StringList(vec!["a".to_owned(), "b".to_owned()]).to_string(),
            "a,b"
        );
    }
}
