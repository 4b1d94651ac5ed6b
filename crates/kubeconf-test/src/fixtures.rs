//! Test fixtures for kubeconfig documents.

use std::collections::BTreeMap;

use kubeconf_config::{AuthInfo, Cluster, ConfigDocument, Context, Preferences};

/// A small kubeconfig in the on-disk format: two clusters, one context, one
/// user, colors on.
pub const SAMPLE_KUBECONFIG: &str = r"apiVersion: v1
kind: Config
clusters:
- name: prod
  cluster:
    server: https://prod.example.com
    certificate-authority-data: Y2EtYnVuZGxl
- name: staging
  cluster:
    server: https://staging.example.com
    insecure-skip-tls-verify: true
contexts:
- name: prod-admin
  context:
    cluster: prod
    user: admin
    namespace: kube-system
users:
- name: admin
  user:
    token: abc123
current-context: prod-admin
preferences:
  colors: true
";

/// Create a cluster pointing at `server`.
#[must_use]
pub fn test_cluster(server: impl Into<String>) -> Cluster {
    Cluster {
        server: server.into(),
        ..Cluster::default()
    }
}

/// Create a context binding `cluster` and `user`.
#[must_use]
pub fn test_context(cluster: impl Into<String>, user: impl Into<String>) -> Context {
    Context {
        cluster: cluster.into(),
        auth_info: user.into(),
        ..Context::default()
    }
}

/// Create credentials holding a bearer token.
#[must_use]
pub fn test_token_user(token: impl Into<String>) -> AuthInfo {
    AuthInfo {
        token: token.into(),
        ..AuthInfo::default()
    }
}

/// A document with one cluster, context and user named `dev`, selected as
/// the current context.
#[must_use]
pub fn test_document() -> ConfigDocument {
    ConfigDocument {
        clusters: BTreeMap::from([("dev".to_owned(), test_cluster("https://dev.example.com"))]),
        contexts: BTreeMap::from([("dev".to_owned(), test_context("dev", "dev"))]),
        auth_infos: BTreeMap::from([("dev".to_owned(), test_token_user("dev-token"))]),
        current_context: "dev".to_owned(),
        ..ConfigDocument::default()
    }
}

/// A fully populated document for exercising `reset`: clusters `a` and `b`,
/// context `dev`, user `admin`, current context `dev`, colors on and one
/// preference extension `e1`.
#[must_use]
pub fn reset_scenario_document() -> ConfigDocument {
    ConfigDocument {
        clusters: BTreeMap::from([
            ("a".to_owned(), test_cluster("https://a.example.com")),
            ("b".to_owned(), test_cluster("https://b.example.com")),
        ]),
        contexts: BTreeMap::from([("dev".to_owned(), test_context("a", "admin"))]),
        auth_infos: BTreeMap::from([("admin".to_owned(), test_token_user("admin-token"))]),
        current_context: "dev".to_owned(),
        preferences: Preferences {
            colors: true,
            extensions: BTreeMap::from([(
                "e1".to_owned(),
                serde_json::json!({"theme": "dark"}),
            )]),
        },
        ..ConfigDocument::default()
    }
}
