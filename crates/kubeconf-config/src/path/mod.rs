//! Path-addressed access to a [`ConfigDocument`](crate::ConfigDocument).
//!
//! A property path such as `clusters.prod.server` is parsed against a static
//! catalog into [`NavigationSteps`], then walked over a live document. Record
//! fields are matched ignoring ASCII case; map keys are matched exactly.
//! `set` creates missing map entries on the way down, `get` and `unset` never
//! do.
//!
//! The engine does no I/O and no logging. Persisting the result is the
//! caller's job.

mod catalog;
mod mutate;
mod navigate;
mod node;
mod parser;
mod value;

pub use catalog::{CATALOG, FieldSpec, Shape, ValueKind, lookup_field};
pub use mutate::{Mutation, get, modify, set, unset};
pub use node::{Navigable, NamedMap, Node, NodeMut, Record, Scalar, ScalarMut};
pub use parser::{NavigationStep, NavigationSteps, SEPARATOR, parse, steps_from};
pub use value::{Property, PropertyValue};

pub(crate) use catalog::{BOOL, BYTES, EXTENSIONS, STRING, STRING_LIST, STRING_MAP};
