//! Static catalog of addressable properties.
//!
//! Every record type publishes a table of [`FieldSpec`]s; the tables nest into
//! a single [`Shape`] tree rooted at [`CATALOG`]. The parser walks this tree to
//! validate paths without touching a document.

use std::fmt;

/// Kind of value held by a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// UTF-8 text.
    String,
    /// `true` / `false`.
    Bool,
    /// Binary data, base64 on disk.
    Bytes,
    /// Ordered list of strings.
    StringList,
    /// Arbitrary structured data (extensions).
    Opaque,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "boolean"),
            Self::Bytes => write!(f, "bytes"),
            Self::StringList => write!(f, "string list"),
            Self::Opaque => write!(f, "opaque data"),
        }
    }
}

/// Structural shape of a node in the document.
#[derive(Debug, PartialEq, Eq)]
pub enum Shape {
    /// Fixed set of named fields.
    Record(&'static [FieldSpec]),
    /// Arbitrary string keys, all values of one shape.
    Map(&'static Shape),
    /// Leaf value.
    Scalar(ValueKind),
}

impl Shape {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Record(_) => "record".to_owned(),
            Self::Map(_) => "map".to_owned(),
            Self::Scalar(kind) => kind.to_string(),
        }
    }

    /// Leaf kind, if this shape is a scalar.
    #[must_use]
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::Record(_) | Self::Map(_) => None,
        }
    }
}

/// One entry of a record's dispatch table.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical property name as written in paths and on disk.
    pub name: &'static str,
    /// Shape of the field's value.
    pub shape: &'static Shape,
}

/// Find a field by property name, ignoring ASCII case.
#[must_use]
pub fn lookup_field(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

pub(crate) const STRING: Shape = Shape::Scalar(ValueKind::String);
pub(crate) const BOOL: Shape = Shape::Scalar(ValueKind::Bool);
pub(crate) const BYTES: Shape = Shape::Scalar(ValueKind::Bytes);
pub(crate) const STRING_LIST: Shape = Shape::Scalar(ValueKind::StringList);
pub(crate) const OPAQUE: Shape = Shape::Scalar(ValueKind::Opaque);
pub(crate) const STRING_MAP: Shape = Shape::Map(&STRING);
pub(crate) const EXTENSIONS: Shape = Shape::Map(&OPAQUE);

/// Root of the property catalog: the shape of a whole
/// [`ConfigDocument`](crate::ConfigDocument).
pub static CATALOG: Shape = Shape::Record(crate::types::DOCUMENT_FIELDS);
