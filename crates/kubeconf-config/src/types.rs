//! The kubeconfig document model.
//!
//! Each record type declares its addressable fields once through `record!`;
//! the macro emits the static dispatch table used by the path parser and the
//! [`Record`] impl used by the navigator. Field names in the table are the
//! names used in property paths and on disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encoding::{base64_bytes, is_default, named_extensions, null_as_default};
use crate::path::{
    BOOL, BYTES, EXTENSIONS, FieldSpec, Navigable, Node, NodeMut, Record, STRING, STRING_LIST,
    STRING_MAP, Shape,
};
use crate::wire::KubeConfigFile;

/// Declare the addressable fields of a record type.
///
/// Generates `$table: &[FieldSpec]` plus [`Record`] and [`Navigable`] impls
/// that dispatch on the canonical property name.
macro_rules! record {
    ($ty:ty, $table:ident { $($name:literal => $field:ident : $shape:expr),+ $(,)? }) => {
        pub(crate) const $table: &[FieldSpec] = &[
            $(FieldSpec { name: $name, shape: &$shape },)+
        ];

        impl Record for $ty {
            fn fields(&self) -> &'static [FieldSpec] {
                $table
            }

            fn field(&self, name: &str) -> Option<Node<'_>> {
                match name {
                    $($name => Some(self.$field.node()),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<NodeMut<'_>> {
                match name {
                    $($name => Some(self.$field.node_mut()),)+
                    _ => None,
                }
            }

            fn reset(&mut self) {
                *self = Self::default();
            }

            fn snapshot(&self) -> serde_json::Value {
                serde_json::to_value(self).unwrap_or_default()
            }
        }

        impl Navigable for $ty {
            fn node(&self) -> Node<'_> {
                Node::Record(self)
            }

            fn node_mut(&mut self) -> NodeMut<'_> {
                NodeMut::Record(self)
            }
        }
    };
}

/// Extension data keyed by extension name.
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// A whole kubeconfig: named clusters, contexts and credentials, the current
/// context pointer and preferences.
///
/// Serializes to and from the on-disk form (`apiVersion: v1`, `kind: Config`,
/// named lists).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "KubeConfigFile", into = "KubeConfigFile")]
pub struct ConfigDocument {
    /// Cluster entries by name.
    pub clusters: BTreeMap<String, Cluster>,
    /// Context entries by name.
    pub contexts: BTreeMap<String, Context>,
    /// Credentials by name. Addressed as `users` in paths and on disk.
    pub auth_infos: BTreeMap<String, AuthInfo>,
    /// Name of the context in use. Empty when unset.
    pub current_context: String,
    /// Client preferences.
    pub preferences: Preferences,
    /// Top-level extensions.
    pub extensions: Extensions,
}

record!(ConfigDocument, DOCUMENT_FIELDS {
    "clusters" => clusters: CLUSTERS,
    "contexts" => contexts: CONTEXTS,
    "users" => auth_infos: USERS,
    "current-context" => current_context: STRING,
    "preferences" => preferences: PREFERENCES,
    "extensions" => extensions: EXTENSIONS,
});

/// How to reach a Kubernetes API server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Cluster {
    /// API server URL.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub server: String,
    /// Server name for TLS SNI and certificate checks.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub tls_server_name: String,
    /// Skip server certificate validation.
    #[serde(skip_serializing_if = "is_default", deserialize_with = "null_as_default")]
    pub insecure_skip_tls_verify: bool,
    /// Path to a CA bundle.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub certificate_authority: String,
    /// Inline CA bundle.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub certificate_authority_data: Vec<u8>,
    /// Proxy for requests to this cluster.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub proxy_url: String,
    /// Disable response compression.
    #[serde(skip_serializing_if = "is_default", deserialize_with = "null_as_default")]
    pub disable_compression: bool,
    /// Extension data.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", with = "named_extensions")]
    pub extensions: Extensions,
}

record!(Cluster, CLUSTER_FIELDS {
    "server" => server: STRING,
    "tls-server-name" => tls_server_name: STRING,
    "insecure-skip-tls-verify" => insecure_skip_tls_verify: BOOL,
    "certificate-authority" => certificate_authority: STRING,
    "certificate-authority-data" => certificate_authority_data: BYTES,
    "proxy-url" => proxy_url: STRING,
    "disable-compression" => disable_compression: BOOL,
    "extensions" => extensions: EXTENSIONS,
});

/// A (cluster, user, namespace) triple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    /// Cluster entry name.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub cluster: String,
    /// Credentials entry name.
    #[serde(
        rename = "user",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub auth_info: String,
    /// Default namespace.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub namespace: String,
    /// Extension data.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", with = "named_extensions")]
    pub extensions: Extensions,
}

record!(Context, CONTEXT_FIELDS {
    "cluster" => cluster: STRING,
    "user" => auth_info: STRING,
    "namespace" => namespace: STRING,
    "extensions" => extensions: EXTENSIONS,
});

/// Credentials for one identity.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthInfo {
    /// Path to a client certificate.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub client_certificate: String,
    /// Inline client certificate.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub client_certificate_data: Vec<u8>,
    /// Path to a client key.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub client_key: String,
    /// Inline client key.
    #[serde(skip_serializing_if = "Vec::is_empty", with = "base64_bytes")]
    pub client_key_data: Vec<u8>,
    /// Bearer token.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub token: String,
    /// Path to a file holding a bearer token.
    #[serde(
        rename = "tokenFile",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub token_file: String,
    /// User to impersonate.
    #[serde(
        rename = "as",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub impersonate: String,
    /// UID to impersonate.
    #[serde(
        rename = "as-uid",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub impersonate_uid: String,
    /// Groups to impersonate.
    #[serde(
        rename = "as-groups",
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub impersonate_groups: Vec<String>,
    /// Basic auth user name.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub username: String,
    /// Basic auth password.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub password: String,
    /// Auth provider plugin settings.
    #[serde(skip_serializing_if = "is_default", deserialize_with = "null_as_default")]
    pub auth_provider: AuthProviderConfig,
    /// Exec credential plugin settings.
    #[serde(skip_serializing_if = "is_default", deserialize_with = "null_as_default")]
    pub exec: ExecConfig,
    /// Extension data.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", with = "named_extensions")]
    pub extensions: Extensions,
}

record!(AuthInfo, AUTH_INFO_FIELDS {
    "client-certificate" => client_certificate: STRING,
    "client-certificate-data" => client_certificate_data: BYTES,
    "client-key" => client_key: STRING,
    "client-key-data" => client_key_data: BYTES,
    "token" => token: STRING,
    "tokenFile" => token_file: STRING,
    "as" => impersonate: STRING,
    "as-uid" => impersonate_uid: STRING,
    "as-groups" => impersonate_groups: STRING_LIST,
    "username" => username: STRING,
    "password" => password: STRING,
    "auth-provider" => auth_provider: AUTH_PROVIDER,
    "exec" => exec: EXEC,
    "extensions" => extensions: EXTENSIONS,
});

impl std::fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInfo")
            .field("client_certificate", &self.client_certificate)
            .field(
                "has_client_certificate_data",
                &!self.client_certificate_data.is_empty(),
            )
            .field("client_key", &self.client_key)
            .field("has_client_key_data", &!self.client_key_data.is_empty())
            .field("has_token", &!self.token.is_empty())
            .field("token_file", &self.token_file)
            .field("impersonate", &self.impersonate)
            .field("impersonate_uid", &self.impersonate_uid)
            .field("impersonate_groups", &self.impersonate_groups)
            .field("username", &self.username)
            .field("has_password", &!self.password.is_empty())
            .field("auth_provider", &self.auth_provider)
            .field("exec", &self.exec)
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Settings for a named auth provider plugin.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthProviderConfig {
    /// Provider name.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub name: String,
    /// Provider-specific settings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, String>,
}

record!(AuthProviderConfig, AUTH_PROVIDER_FIELDS {
    "name" => name: STRING,
    "config" => config: STRING_MAP,
});

impl std::fmt::Debug for AuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Provider config routinely carries refresh and id tokens.
        let redacted: BTreeMap<&String, &str> = self.config.keys().map(|k| (k, "***")).collect();
        f.debug_struct("AuthProviderConfig")
            .field("name", &self.name)
            .field("config", &redacted)
            .finish()
    }
}

/// Settings for an exec credential plugin.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Command to run.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub command: String,
    /// Command arguments.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub args: Vec<String>,
    /// Extra environment for the command. Not addressable by path.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub env: Vec<ExecEnvVar>,
    /// Preferred `client.authentication.k8s.io` version.
    #[serde(
        rename = "apiVersion",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub api_version: String,
    /// Message shown when the command is missing.
    #[serde(
        rename = "installHint",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub install_hint: String,
    /// Pass cluster info to the plugin.
    #[serde(
        rename = "provideClusterInfo",
        skip_serializing_if = "is_default",
        deserialize_with = "null_as_default"
    )]
    pub provide_cluster_info: bool,
    /// `Never`, `IfAvailable` or `Always`.
    #[serde(
        rename = "interactiveMode",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub interactive_mode: String,
}

record!(ExecConfig, EXEC_FIELDS {
    "command" => command: STRING,
    "args" => args: STRING_LIST,
    "apiVersion" => api_version: STRING,
    "installHint" => install_hint: STRING,
    "provideClusterInfo" => provide_cluster_info: BOOL,
    "interactiveMode" => interactive_mode: STRING,
});

impl std::fmt::Debug for ExecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted_env: Vec<(&str, &str)> =
            self.env.iter().map(|v| (v.name.as_str(), "***")).collect();
        f.debug_struct("ExecConfig")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("env", &redacted_env)
            .field("api_version", &self.api_version)
            .field("install_hint", &self.install_hint)
            .field("provide_cluster_info", &self.provide_cluster_info)
            .field("interactive_mode", &self.interactive_mode)
            .finish()
    }
}

/// One environment variable for an exec plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecEnvVar {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: String,
}

/// Client-side preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Colorized output.
    #[serde(skip_serializing_if = "is_default", deserialize_with = "null_as_default")]
    pub colors: bool,
    /// Extension data.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", with = "named_extensions")]
    pub extensions: Extensions,
}

record!(Preferences, PREFERENCES_FIELDS {
    "colors" => colors: BOOL,
    "extensions" => extensions: EXTENSIONS,
});

const CLUSTER: Shape = Shape::Record(CLUSTER_FIELDS);
const CONTEXT: Shape = Shape::Record(CONTEXT_FIELDS);
const AUTH_INFO: Shape = Shape::Record(AUTH_INFO_FIELDS);
const AUTH_PROVIDER: Shape = Shape::Record(AUTH_PROVIDER_FIELDS);
const EXEC: Shape = Shape::Record(EXEC_FIELDS);
const PREFERENCES: Shape = Shape::Record(PREFERENCES_FIELDS);
const CLUSTERS: Shape = Shape::Map(&CLUSTER);
const CONTEXTS: Shape = Shape::Map(&CONTEXT);
const USERS: Shape = Shape::Map(&AUTH_INFO);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table_matches_record() {
        let mut cluster = Cluster::default();
        for spec in CLUSTER_FIELDS {
            assert!(cluster.field(spec.name).is_some(), "{}", spec.name);
            assert!(cluster.field_mut(spec.name).is_some(), "{}", spec.name);
        }
        assert!(cluster.field("Server").is_none());
    }

    #[test]
    fn test_every_table_is_dispatchable() {
        let mut doc = ConfigDocument::default();
        let mut auth = AuthInfo::default();
        for spec in DOCUMENT_FIELDS {
            assert!(doc.field_mut(spec.name).is_some(), "{}", spec.name);
        }
        for spec in AUTH_INFO_FIELDS {
            assert!(auth.field_mut(spec.name).is_some(), "{}", spec.name);
        }
        for spec in EXEC_FIELDS {
            assert!(auth.exec.field(spec.name).is_some(), "{}", spec.name);
        }
        for spec in AUTH_PROVIDER_FIELDS {
            assert!(auth.auth_provider.field(spec.name).is_some(), "{}", spec.name);
        }
        let ctx = Context::default();
        for spec in CONTEXT_FIELDS {
            assert!(ctx.field(spec.name).is_some(), "{}", spec.name);
        }
        let prefs = Preferences::default();
        for spec in PREFERENCES_FIELDS {
            assert!(prefs.field(spec.name).is_some(), "{}", spec.name);
        }
    }

    #[test]
    fn test_record_snapshot_uses_disk_names() {
        let cluster = Cluster {
            server: "https://a".to_owned(),
            insecure_skip_tls_verify: true,
            certificate_authority_data: b"ca".to_vec(),
            ..Cluster::default()
        };
        let snapshot = cluster.snapshot();
        assert_eq!(snapshot["server"], "https://a");
        assert_eq!(snapshot["insecure-skip-tls-verify"], true);
        assert_eq!(snapshot["certificate-authority-data"], "Y2E=");
        assert!(snapshot.get("proxy-url").is_none());
    }

    #[test]
    fn test_reset_record() {
        let mut prefs = Preferences {
            colors: true,
            extensions: BTreeMap::from([("e".to_owned(), serde_json::json!(1))]),
        };
        prefs.reset();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_auth_info_debug_redacts_secrets() {
        let auth = AuthInfo {
            token: "very-secret-token".to_owned(),
            password: "hunter2".to_owned(),
            client_key_data: b"private".to_vec(),
            auth_provider: AuthProviderConfig {
                name: "oidc".to_owned(),
                config: BTreeMap::from([("id-token".to_owned(), "jwt-value".to_owned())]),
            },
            ..AuthInfo::default()
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("jwt-value"));
        assert!(debug.contains("has_token: true"));
        assert!(debug.contains("id-token"));
    }

    #[test]
    fn test_context_user_field_name() {
        let ctx = Context {
            cluster: "c".to_owned(),
            auth_info: "u".to_owned(),
            ..Context::default()
        };
        let yaml = serde_yaml::to_string(&ctx).unwrap();
        assert!(yaml.contains("user: u"));
        let back: Context = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn test_auth_info_camel_case_names() {
        let yaml = "tokenFile: /t\nas: admin\nas-groups: [a, b]\nexec:\n  command: aws\n  apiVersion: v1\n  provideClusterInfo: true\n";
        let auth: AuthInfo = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(auth.token_file, "/t");
        assert_eq!(auth.impersonate, "admin");
        assert_eq!(auth.impersonate_groups, vec!["a", "b"]);
        assert_eq!(auth.exec.command, "aws");
        assert_eq!(auth.exec.api_version, "v1");
        assert!(auth.exec.provide_cluster_info);
    }
}
