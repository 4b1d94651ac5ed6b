#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Kubeconfig documents and path-addressed property editing.
//!
//! This crate provides the [`ConfigDocument`] model of a kubeconfig file and
//! an engine that reads and edits any field of it through a dotted property
//! path such as `clusters.prod.server` or `preferences.colors`.
//!
//! # Usage
//!
//! ```rust
//! use kubeconf_config::{ConfigDocument, PropertyValue};
//!
//! let mut doc = ConfigDocument::default();
//! doc.set_property("clusters.prod.server", "https://prod.example.com").unwrap();
//! doc.set_property("preferences.colors", true).unwrap();
//!
//! assert_eq!(doc.clusters["prod"].server, "https://prod.example.com");
//! assert_eq!(
//!     doc.get_property("preferences.colors").unwrap().and_then(|p| p.as_value().cloned()),
//!     Some(PropertyValue::Bool(true)),
//! );
//!
//! doc.unset_property("clusters.prod").unwrap();
//! assert!(doc.clusters.is_empty());
//! ```
//!
//! # Design
//!
//! Paths are validated against a static catalog ([`path::CATALOG`]) before
//! they touch a document. Navigation then dispatches through per-record
//! tables instead of reflection. The engine mutates in place and never
//! performs I/O; loading and persisting live in [`loader`].

mod encoding;

/// Configuration error types.
pub mod error;
/// Kubeconfig file discovery, loading and persistence.
pub mod loader;
/// Property path parsing, navigation and mutation.
pub mod path;
/// Clearing a kubeconfig back to an empty state.
pub mod reset;
/// Document model.
pub mod types;
/// On-disk layout.
pub mod wire;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult, PathError};
pub use loader::ConfigAccess;
pub use path::{Mutation, NavigationStep, NavigationSteps, Property, PropertyValue};
pub use reset::DeletedConfigs;
pub use types::*;

impl ConfigDocument {
    /// Load a kubeconfig file. A missing file is an empty document.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load(file: &std::path::Path) -> ConfigResult<Self> {
        loader::load(file)
    }

    /// Read the property at `property`. `Ok(None)` means a map key on the
    /// way does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Path`] for a malformed or unknown path.
    pub fn get_property(&self, property: &str) -> ConfigResult<Option<Property>> {
        let steps = path::parse(property)?;
        Ok(path::get(self, &steps)?)
    }

    /// Assign `value` at `property`, creating missing map entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Path`] for a malformed or unknown path, or a
    /// value of the wrong kind.
    pub fn set_property(
        &mut self,
        property: &str,
        value: impl Into<PropertyValue>,
    ) -> ConfigResult<()> {
        let steps = path::parse(property)?;
        Ok(path::set(self, &steps, value)?)
    }

    /// Parse `raw` as the kind declared at `property` and assign it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Path`] for a malformed or unknown path, or text
    /// that does not parse as the target kind.
    pub fn set_raw_property(
        &mut self,
        property: &str,
        raw: &str,
        raw_bytes: bool,
    ) -> ConfigResult<()> {
        let steps = path::parse(property)?;
        let value = PropertyValue::from_raw(steps.target(), property, raw, raw_bytes)?;
        Ok(path::set(self, &steps, value)?)
    }

    /// Clear the property at `property`. Absent entries are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Path`] for a malformed or unknown path.
    pub fn unset_property(&mut self, property: &str) -> ConfigResult<()> {
        let steps = path::parse(property)?;
        Ok(path::unset(self, &steps)?)
    }
}
