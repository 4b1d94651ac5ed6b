//! Uniform views over heterogeneous document nodes.
//!
//! A document is made of three node kinds: fixed-shape records, maps keyed by
//! arbitrary names, and scalar leaves. [`Node`] and [`NodeMut`] wrap a borrow
//! of any of them so the navigator can descend without knowing the concrete
//! Rust type at each level.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::catalog::{FieldSpec, ValueKind};
use super::value::{Property, PropertyValue};
use crate::error::PathError;

/// A fixed-shape record with a static dispatch table.
///
/// `field` and `field_mut` take the canonical name from
/// [`fields`](Record::fields); case folding happens before the call.
pub trait Record {
    /// The record's dispatch table.
    fn fields(&self) -> &'static [FieldSpec];

    /// Borrow a field by canonical name.
    fn field(&self, name: &str) -> Option<Node<'_>>;

    /// Mutably borrow a field by canonical name.
    fn field_mut(&mut self, name: &str) -> Option<NodeMut<'_>>;

    /// Reset every field to its zero value.
    fn reset(&mut self);

    /// Structured copy of the record.
    fn snapshot(&self) -> serde_json::Value;
}

/// A map of named entries that all share one shape.
pub trait NamedMap {
    /// Borrow an entry.
    fn lookup(&self, key: &str) -> Option<Node<'_>>;

    /// Mutably borrow an existing entry.
    fn lookup_mut(&mut self, key: &str) -> Option<NodeMut<'_>>;

    /// Mutably borrow an entry, inserting an empty one when absent.
    fn get_or_insert(&mut self, key: &str) -> NodeMut<'_>;

    /// Assign a leaf value to the entry at `key`. An absent entry is only
    /// inserted once the assignment succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::TypeMismatch`] if the entry is not a leaf of the
    /// value's kind.
    fn assign_entry(
        &mut self,
        key: &str,
        value: PropertyValue,
        path: &str,
    ) -> Result<(), PathError>;

    /// Remove an entry. Returns whether it existed.
    fn remove_key(&mut self, key: &str) -> bool;

    /// Remove every entry.
    fn clear_all(&mut self);

    /// Structured copy of the map.
    fn snapshot(&self) -> serde_json::Value;
}

/// Anything that can be presented as a document node.
pub trait Navigable {
    /// Shared view of this value.
    fn node(&self) -> Node<'_>;

    /// Exclusive view of this value.
    fn node_mut(&mut self) -> NodeMut<'_>;
}

/// Shared borrow of a document node.
pub enum Node<'a> {
    /// Fixed-shape record.
    Record(&'a dyn Record),
    /// Dynamically keyed map.
    Map(&'a dyn NamedMap),
    /// Leaf.
    Scalar(Scalar<'a>),
}

/// Exclusive borrow of a document node.
pub enum NodeMut<'a> {
    /// Fixed-shape record.
    Record(&'a mut dyn Record),
    /// Dynamically keyed map.
    Map(&'a mut dyn NamedMap),
    /// Leaf.
    Scalar(ScalarMut<'a>),
}

/// Shared borrow of a leaf.
#[derive(Debug)]
pub enum Scalar<'a> {
    /// Text.
    String(&'a str),
    /// Boolean.
    Bool(bool),
    /// Binary data.
    Bytes(&'a [u8]),
    /// String list.
    StringList(&'a [String]),
    /// Structured extension data.
    Opaque(&'a serde_json::Value),
}

/// Exclusive borrow of a leaf.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    /// Text.
    String(&'a mut String),
    /// Boolean.
    Bool(&'a mut bool),
    /// Binary data.
    Bytes(&'a mut Vec<u8>),
    /// String list.
    StringList(&'a mut Vec<String>),
    /// Structured extension data.
    Opaque(&'a mut serde_json::Value),
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => f.debug_tuple("Record").field(&record.snapshot()).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(&map.snapshot()).finish(),
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
        }
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => f.debug_tuple("Record").field(&record.snapshot()).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(&map.snapshot()).finish(),
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
        }
    }
}

impl Node<'_> {
    /// Copy the node out as a [`Property`].
    #[must_use]
    pub fn to_property(&self) -> Property {
        match self {
            Self::Record(record) => Property::Tree(record.snapshot()),
            Self::Map(map) => Property::Tree(map.snapshot()),
            Self::Scalar(scalar) => Property::Value(scalar.to_value()),
        }
    }
}

impl Scalar<'_> {
    fn to_value(&self) -> PropertyValue {
        match self {
            Self::String(s) => PropertyValue::String((*s).to_owned()),
            Self::Bool(b) => PropertyValue::Bool(*b),
            Self::Bytes(bytes) => PropertyValue::Bytes(bytes.to_vec()),
            Self::StringList(items) => PropertyValue::StringList(items.to_vec()),
            Self::Opaque(value) => PropertyValue::Opaque((*value).clone()),
        }
    }
}

impl NodeMut<'_> {
    /// Name of the node's shape for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Record(_) => "record".to_owned(),
            Self::Map(_) => "map".to_owned(),
            Self::Scalar(scalar) => scalar.kind().to_string(),
        }
    }

    /// Reset the node to its zero value: records to their defaults, maps to
    /// empty, leaves to their empty value.
    pub fn clear(self) {
        match self {
            Self::Record(record) => record.reset(),
            Self::Map(map) => map.clear_all(),
            Self::Scalar(scalar) => scalar.clear(),
        }
    }

    /// Assign a leaf value.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::TypeMismatch`] if the node is not a leaf of the
    /// value's kind.
    pub fn assign(self, value: PropertyValue, path: &str) -> Result<(), PathError> {
        let expected = self.describe();
        let actual = value.kind();
        let mismatch = || PathError::TypeMismatch {
            path: path.to_owned(),
            expected: expected.clone(),
            actual: actual.to_string(),
        };

        let Self::Scalar(slot) = self else {
            return Err(mismatch());
        };

        match (slot, value) {
            (ScalarMut::String(slot), PropertyValue::String(v)) => *slot = v,
            (ScalarMut::Bool(slot), PropertyValue::Bool(v)) => *slot = v,
            (ScalarMut::Bytes(slot), PropertyValue::Bytes(v)) => *slot = v,
            (ScalarMut::StringList(slot), PropertyValue::StringList(v)) => *slot = v,
            (ScalarMut::Opaque(slot), PropertyValue::Opaque(v)) => *slot = v,
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

impl ScalarMut<'_> {
    /// Kind of the leaf.
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

    fn clear(self) {
        match self {
            Self::String(s) => s.clear(),
            Self::Bool(b) => *b = false,
            Self::Bytes(bytes) => bytes.clear(),
            Self::StringList(items) => items.clear(),
            Self::Opaque(value) => *value = serde_json::Value::Null,
        }
    }
}

impl Navigable for String {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Scalar::String(self))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(ScalarMut::String(self))
    }
}

impl Navigable for bool {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Scalar::Bool(*self))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(ScalarMut::Bool(self))
    }
}

impl Navigable for Vec<u8> {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Scalar::Bytes(self))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(ScalarMut::Bytes(self))
    }
}

impl Navigable for Vec<String> {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Scalar::StringList(self))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(ScalarMut::StringList(self))
    }
}

impl Navigable for serde_json::Value {
    fn node(&self) -> Node<'_> {
        Node::Scalar(Scalar::Opaque(self))
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Scalar(ScalarMut::Opaque(self))
    }
}

impl<T> NamedMap for BTreeMap<String, T>
where
    T: Navigable + Default + Serialize,
{
    fn lookup(&self, key: &str) -> Option<Node<'_>> {
        self.get(key).map(Navigable::node)
    }

    fn lookup_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        self.get_mut(key).map(Navigable::node_mut)
    }

    fn get_or_insert(&mut self, key: &str) -> NodeMut<'_> {
        BTreeMap::entry(self, key.to_owned())
            .or_default()
            .node_mut()
    }

    fn assign_entry(
        &mut self,
        key: &str,
        value: PropertyValue,
        path: &str,
    ) -> Result<(), PathError> {
        if let Some(entry) = self.get_mut(key) {
            return entry.node_mut().assign(value, path);
        }
        let mut entry = T::default();
        entry.node_mut().assign(value, path)?;
        self.insert(key.to_owned(), entry);
        Ok(())
    }

    fn remove_key(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    fn clear_all(&mut self) {
        self.clear();
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl<T> Navigable for BTreeMap<String, T>
where
    T: Navigable + Default + Serialize,
{
    fn node(&self) -> Node<'_> {
        Node::Map(self)
    }

    fn node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::Map(self)
    }
}
