//! Applying get / set / unset at a resolved path.
//!
//! Mutations happen in place on the caller's document. There is no snapshot or
//! rollback: a set that inserts intermediate map entries and then fails at the
//! leaf leaves those entries behind. The entry named by the last step is only
//! inserted when the assignment succeeds.

use super::catalog::lookup_field;
use super::navigate::{Access, descend, resolve, resolve_mut, too_deep};
use super::node::{Navigable, NodeMut};
use super::parser::{NavigationStep, join};
use super::value::{Property, PropertyValue};
use crate::error::PathError;
use crate::types::ConfigDocument;

/// The change to make at a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Assign a leaf value, creating missing map entries on the way.
    Set(PropertyValue),
    /// Reset a record field to its zero value or remove a map entry.
    Unset,
}

/// Apply `mutation` at `steps` inside `root`.
///
/// # Errors
///
/// - [`PathError::EmptySegment`] if `steps` is empty.
/// - [`PathError::UnknownProperty`] / [`PathError::PathTooDeep`] if a step does
///   not fit the document's shape.
/// - [`PathError::TypeMismatch`] if a set value does not fit the target.
/// - [`PathError::Unresolved`] if a set walk stops short of its target.
pub fn modify(
    root: &mut ConfigDocument,
    steps: &[NavigationStep],
    mutation: Mutation,
) -> Result<(), PathError> {
    let Some((last, prefix)) = steps.split_last() else {
        return Err(PathError::EmptySegment { position: 0 });
    };

    match mutation {
        Mutation::Unset => {
            let Some(parent) = resolve_mut(root.node_mut(), prefix, Access::Existing)? else {
                return Ok(());
            };
            unset_child(parent, last)
        },
        Mutation::Set(value) => {
            let path = join(steps);
            let unresolved = || PathError::Unresolved { path: path.clone() };
            match resolve_mut(root.node_mut(), prefix, Access::Create)? {
                Some(NodeMut::Map(map)) => map.assign_entry(&last.name, value, &path),
                Some(parent) => match descend(parent, last, Access::Existing)? {
                    Some(target) => target.assign(value, &path),
                    None => Err(unresolved()),
                },
                None => Err(unresolved()),
            }
        },
    }
}

fn unset_child(parent: NodeMut<'_>, step: &NavigationStep) -> Result<(), PathError> {
    match parent {
        NodeMut::Record(record) => {
            let spec = lookup_field(record.fields(), &step.name).ok_or_else(|| {
                PathError::UnknownProperty {
                    property: step.name.clone(),
                    position: step.position,
                }
            })?;
            if let Some(field) = record.field_mut(spec.name) {
                field.clear();
            }
            Ok(())
        },
        NodeMut::Map(map) => {
            map.remove_key(&step.name);
            Ok(())
        },
        NodeMut::Scalar(_) => Err(too_deep(step)),
    }
}

/// Assign `value` at `steps`. Shorthand for [`modify`] with
/// [`Mutation::Set`].
///
/// # Errors
///
/// See [`modify`].
pub fn set(
    root: &mut ConfigDocument,
    steps: &[NavigationStep],
    value: impl Into<PropertyValue>,
) -> Result<(), PathError> {
    modify(root, steps, Mutation::Set(value.into()))
}

/// Unset `steps`. Shorthand for [`modify`] with [`Mutation::Unset`].
///
/// # Errors
///
/// See [`modify`].
pub fn unset(root: &mut ConfigDocument, steps: &[NavigationStep]) -> Result<(), PathError> {
    modify(root, steps, Mutation::Unset)
}

/// Read the node at `steps`. Returns `Ok(None)` when a map key on the way is
/// absent.
///
/// # Errors
///
/// - [`PathError::EmptySegment`] if `steps` is empty.
/// - [`PathError::UnknownProperty`] / [`PathError::PathTooDeep`] if a step does
///   not fit the document's shape.
pub fn get(root: &ConfigDocument, steps: &[NavigationStep]) -> Result<Option<Property>, PathError> {
    if steps.is_empty() {
        return Err(PathError::EmptySegment { position: 0 });
    }
    Ok(resolve(root.node(), steps)?.map(|node| node.to_property()))
}
