use std::fmt;
use std::ops::Deref;

use super::catalog::{CATALOG, Shape, lookup_field};
use crate::error::PathError;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// One segment of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStep {
    /// Property name or map key, as written.
    pub name: String,
    /// Zero-based index of the segment within the path.
    pub position: usize,
}

impl NavigationStep {
    /// Create a step.
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Build a step sequence without catalog validation.
///
/// The navigator re-checks every step, so hand-built sequences are safe to
/// apply; they simply fail later than a parsed path would.
#[must_use]
pub fn steps_from<I, S>(names: I) -> Vec<NavigationStep>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(position, name)| NavigationStep::new(name, position))
        .collect()
}

/// A validated path: its steps plus the catalog shape it addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSteps {
    steps: Vec<NavigationStep>,
    target: &'static Shape,
}

impl NavigationSteps {
    /// Shape of the node the path ends at.
    #[must_use]
    pub fn target(&self) -> &'static Shape {
        self.target
    }

    /// Consume into the bare step list.
    #[must_use]
    pub fn into_steps(self) -> Vec<NavigationStep> {
        self.steps
    }
}

impl Deref for NavigationSteps {
    type Target = [NavigationStep];

    fn deref(&self) -> &Self::Target {
        &self.steps
    }
}

impl fmt::Display for NavigationSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.steps))
    }
}

/// Join steps back into a dotted path.
pub(crate) fn join(steps: &[NavigationStep]) -> String {
    steps
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

/// Parse a dotted property path.
///
/// Structure is checked before names, so `a..b` is an
/// [`EmptySegment`](PathError::EmptySegment) even though `a` is unknown.
/// Segments following a map are keys and are accepted as written; every other
/// segment must name a field of the record it addresses (ASCII
/// case-insensitive).
///
/// # Errors
///
/// - [`PathError::EmptySegment`] for an empty path or an empty segment.
/// - [`PathError::UnknownProperty`] for a segment that is not in the catalog.
/// - [`PathError::PathTooDeep`] for a segment below a leaf.
pub fn parse(path: &str) -> Result<NavigationSteps, PathError> {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    if let Some(position) = segments.iter().position(|s| s.is_empty()) {
        return Err(PathError::EmptySegment { position });
    }

    let mut shape: &'static Shape = &CATALOG;
    let mut steps = Vec::with_capacity(segments.len());

    for (position, segment) in segments.into_iter().enumerate() {
        shape = match *shape {
            Shape::Record(fields) => {
                lookup_field(fields, segment)
                    .ok_or_else(|| PathError::UnknownProperty {
                        property: segment.to_owned(),
                        position,
                    })?
                    .shape
            },
            Shape::Map(value) => value,
            Shape::Scalar(_) => {
                return Err(PathError::PathTooDeep {
                    property: segment.to_owned(),
                    position,
                });
            },
        };
        steps.push(NavigationStep::new(segment, position));
    }

    Ok(NavigationSteps {
        steps,
        target: shape,
    })
}
