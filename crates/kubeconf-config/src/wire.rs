//! On-disk kubeconfig layout.
//!
//! The file stores clusters, contexts and users as lists of `{name, <entry>}`
//! pairs. [`ConfigDocument`] keeps them as maps; this module converts between
//! the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encoding::{named_extensions, null_as_default};
use crate::types::{AuthInfo, Cluster, ConfigDocument, Context, Extensions, Preferences};

/// `apiVersion` written to every file.
pub const API_VERSION: &str = "v1";
/// `kind` written to every file.
pub const KIND: &str = "Config";

/// A kubeconfig file as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubeConfigFile {
    /// Schema version, normally `v1`.
    #[serde(rename = "apiVersion", skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    /// Object kind, normally `Config`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Client preferences.
    #[serde(deserialize_with = "null_as_default")]
    pub preferences: Preferences,
    /// Named clusters.
    #[serde(deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedCluster>,
    /// Named credentials.
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<NamedAuthInfo>,
    /// Named contexts.
    #[serde(deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    /// Context in use.
    #[serde(rename = "current-context", deserialize_with = "null_as_default")]
    pub current_context: String,
    /// Top-level extensions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", with = "named_extensions")]
    pub extensions: Extensions,
}

/// A cluster list entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    /// Entry name.
    pub name: String,
    /// Entry body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: Cluster,
}

/// A context list entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    /// Entry name.
    pub name: String,
    /// Entry body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Context,
}

/// A user list entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedAuthInfo {
    /// Entry name.
    pub name: String,
    /// Entry body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: AuthInfo,
}

impl From<ConfigDocument> for KubeConfigFile {
    fn from(doc: ConfigDocument) -> Self {
        Self {
            api_version: API_VERSION.to_owned(),
            kind: KIND.to_owned(),
            preferences: doc.preferences,
            clusters: doc
                .clusters
                .into_iter()
                .map(|(name, cluster)| NamedCluster { name, cluster })
                .collect(),
            users: doc
                .auth_infos
                .into_iter()
                .map(|(name, user)| NamedAuthInfo { name, user })
                .collect(),
            contexts: doc
                .contexts
                .into_iter()
                .map(|(name, context)| NamedContext { name, context })
                .collect(),
            current_context: doc.current_context,
            extensions: doc.extensions,
        }
    }
}

/// Later entries with a duplicate name replace earlier ones.
impl From<KubeConfigFile> for ConfigDocument {
    fn from(file: KubeConfigFile) -> Self {
        Self {
            clusters: file
                .clusters
                .into_iter()
                .map(|c| (c.name, c.cluster))
                .collect(),
            contexts: file
                .contexts
                .into_iter()
                .map(|c| (c.name, c.context))
                .collect(),
            auth_infos: file.users.into_iter().map(|u| (u.name, u.user)).collect(),
            current_context: file.current_context,
            preferences: file.preferences,
            extensions: file.extensions,
        }
    }
}
