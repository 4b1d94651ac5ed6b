//! Step-by-step resolution of a path against a live document.

use super::catalog::lookup_field;
use super::node::{Node, NodeMut};
use super::parser::NavigationStep;
use crate::error::PathError;

/// Whether a walk may insert missing map entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Absent map keys end the walk.
    Existing,
    /// Absent map keys get an empty entry.
    Create,
}

fn unknown(step: &NavigationStep) -> PathError {
    PathError::UnknownProperty {
        property: step.name.clone(),
        position: step.position,
    }
}

pub(crate) fn too_deep(step: &NavigationStep) -> PathError {
    PathError::PathTooDeep {
        property: step.name.clone(),
        position: step.position,
    }
}

/// Move one step down from `node`.
///
/// Returns `Ok(None)` only for an absent map key under [`Access::Existing`].
pub(crate) fn descend<'a>(
    node: NodeMut<'a>,
    step: &NavigationStep,
    access: Access,
) -> Result<Option<NodeMut<'a>>, PathError> {
    match node {
        NodeMut::Record(record) => {
            let spec = lookup_field(record.fields(), &step.name).ok_or_else(|| unknown(step))?;
            record
                .field_mut(spec.name)
                .map(Some)
                .ok_or_else(|| unknown(step))
        },
        NodeMut::Map(map) => match access {
            Access::Create => Ok(Some(map.get_or_insert(&step.name))),
            Access::Existing => Ok(map.lookup_mut(&step.name)),
        },
        NodeMut::Scalar(_) => Err(too_deep(step)),
    }
}

/// Walk every step from `root`, returning the node at the end.
///
/// # Errors
///
/// [`PathError::UnknownProperty`] for a name a record does not declare,
/// [`PathError::PathTooDeep`] for a step below a leaf.
pub(crate) fn resolve_mut<'a>(
    root: NodeMut<'a>,
    steps: &[NavigationStep],
    access: Access,
) -> Result<Option<NodeMut<'a>>, PathError> {
    let mut current = root;
    for step in steps {
        match descend(current, step, access)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Read-only counterpart of [`resolve_mut`]. Never creates entries.
pub(crate) fn resolve<'a>(
    root: Node<'a>,
    steps: &[NavigationStep],
) -> Result<Option<Node<'a>>, PathError> {
    let mut current = root;
    for step in steps {
        current = match current {
            Node::Record(record) => {
                let spec =
                    lookup_field(record.fields(), &step.name).ok_or_else(|| unknown(step))?;
                record.field(spec.name).ok_or_else(|| unknown(step))?
            },
            Node::Map(map) => match map.lookup(&step.name) {
                Some(entry) => entry,
                None => return Ok(None),
            },
            Node::Scalar(_) => return Err(too_deep(step)),
        };
    }
    Ok(Some(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::node::Navigable;
    use crate::path::parser::steps_from;
    use crate::types::{Cluster, ConfigDocument};

    fn doc_with_cluster() -> ConfigDocument {
        let mut doc = ConfigDocument::default();
        doc.clusters.insert(
            "prod".to_owned(),
            Cluster {
                server: "https://prod".to_owned(),
                ..Cluster::default()
            },
        );
        doc
    }

    #[test]
    fn test_resolve_is_case_insensitive_for_fields() {
        let doc = doc_with_cluster();
        let node = resolve(doc.node(), &steps_from(["CLUSTERS", "prod", "Server"]))
            .unwrap()
            .unwrap();
        assert!(matches!(
            node,
            Node::Scalar(crate::path::node::Scalar::String("https://prod"))
        ));
    }

    #[test]
    fn test_resolve_is_case_sensitive_for_keys() {
        let doc = doc_with_cluster();
        let node = resolve(doc.node(), &steps_from(["clusters", "PROD", "server"])).unwrap();
        assert!(node.is_none());
    }

    #[test]
    fn test_resolve_rejects_unknown_field() {
        let doc = doc_with_cluster();
        let err = resolve(doc.node(), &steps_from(["clusters", "prod", "nope"])).unwrap_err();
        assert_eq!(err, PathError::UnknownProperty {
            property: "nope".to_owned(),
            position: 2,
        });
    }

    #[test]
    fn test_resolve_below_leaf() {
        let doc = doc_with_cluster();
        let err = resolve(doc.node(), &steps_from(["current-context", "x"])).unwrap_err();
        assert!(matches!(err, PathError::PathTooDeep { position: 1, .. }));
    }

    #[test]
    fn test_resolve_mut_existing_does_not_create() {
        let mut doc = doc_with_cluster();
        let node = resolve_mut(
            doc.node_mut(),
            &steps_from(["clusters", "other", "server"]),
            Access::Existing,
        )
        .unwrap();
        assert!(node.is_none());
        assert!(!doc.clusters.contains_key("other"));
    }

    #[test]
    fn test_resolve_mut_create_inserts_entry() {
        let mut doc = doc_with_cluster();
        let node = resolve_mut(
            doc.node_mut(),
            &steps_from(["clusters", "other"]),
            Access::Create,
        )
        .unwrap();
        assert!(matches!(node, Some(NodeMut::Record(_))));
        assert!(doc.clusters.contains_key("other"));
    }
}
