//! Resetting a kubeconfig to an empty state.
//!
//! The current context and preferences are cleared through the path engine,
//! one property at a time. Clusters, contexts and users are drained directly
//! so the removed names can be reported.

use tracing::debug;

use crate::error::ConfigResult;
use crate::path;
use crate::types::ConfigDocument;

/// Path of the current context pointer.
pub const CURRENT_CONTEXT_PROPERTY: &str = "current-context";
/// Path of the colors preference.
pub const PREFERENCES_COLORS_PROPERTY: &str = "preferences.colors";
/// Path of the preference extensions.
pub const PREFERENCES_EXTENSIONS_PROPERTY: &str = "preferences.extensions";

/// Names removed by [`delete_primary_configs`], each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedConfigs {
    /// Removed cluster names.
    pub clusters: Vec<String>,
    /// Removed context names.
    pub contexts: Vec<String>,
    /// Removed user names.
    pub users: Vec<String>,
}

impl DeletedConfigs {
    /// Whether nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.contexts.is_empty() && self.users.is_empty()
    }
}

fn unset_property(doc: &mut ConfigDocument, property: &str) -> ConfigResult<()> {
    let steps = path::parse(property)?;
    path::unset(doc, &steps)?;
    debug!(property, "unset property");
    Ok(())
}

/// Clear `current-context`.
///
/// # Errors
///
/// Only fails if the property catalog no longer declares the path.
pub fn unset_current_context(doc: &mut ConfigDocument) -> ConfigResult<()> {
    unset_property(doc, CURRENT_CONTEXT_PROPERTY)
}

/// Clear `preferences.colors` and `preferences.extensions`.
///
/// # Errors
///
/// Only fails if the property catalog no longer declares the paths.
pub fn unset_preferences(doc: &mut ConfigDocument) -> ConfigResult<()> {
    unset_property(doc, PREFERENCES_COLORS_PROPERTY)?;
    unset_property(doc, PREFERENCES_EXTENSIONS_PROPERTY)
}

/// Remove every cluster, context and user, returning their names.
pub fn delete_primary_configs(doc: &mut ConfigDocument) -> DeletedConfigs {
    let deleted = DeletedConfigs {
        clusters: std::mem::take(&mut doc.clusters).into_keys().collect(),
        contexts: std::mem::take(&mut doc.contexts).into_keys().collect(),
        users: std::mem::take(&mut doc.auth_infos).into_keys().collect(),
    };
    debug!(
        clusters = deleted.clusters.len(),
        contexts = deleted.contexts.len(),
        users = deleted.users.len(),
        "deleted primary configs"
    );
    deleted
}

/// Clear the current context and preferences, then delete every cluster,
/// context and user.
///
/// Top-level extensions are kept.
///
/// # Errors
///
/// See [`unset_current_context`] and [`unset_preferences`].
pub fn reset(doc: &mut ConfigDocument) -> ConfigResult<DeletedConfigs> {
    unset_current_context(doc)?;
    unset_preferences(doc)?;
    Ok(delete_primary_configs(doc))
}
