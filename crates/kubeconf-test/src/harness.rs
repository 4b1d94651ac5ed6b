//! Temporary kubeconfig files for filesystem tests.

use std::path::{Path, PathBuf};

use kubeconf_config::{ConfigAccess, ConfigDocument, loader};
use tempfile::TempDir;

/// A kubeconfig path inside a private temporary directory.
///
/// The directory is removed when the harness is dropped.
pub struct TempKubeconfig {
    path: PathBuf,
    /// Held to prevent cleanup.
    _dir: TempDir,
}

impl TempKubeconfig {
    /// A path to a kubeconfig that does not exist yet.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        let path = dir.path().join(".kube").join("config");
        Self { path, _dir: dir }
    }

    /// A kubeconfig pre-populated with `doc`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn with_document(doc: &ConfigDocument) -> Self {
        let harness = Self::new();
        loader::persist(&harness.path, doc).expect("failed to write kubeconfig");
        harness
    }

    /// A kubeconfig containing `yaml` verbatim.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn with_yaml(yaml: &str) -> Self {
        let harness = Self::new();
        if let Some(parent) = harness.path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create kubeconfig dir");
        }
        std::fs::write(&harness.path, yaml).expect("failed to write kubeconfig");
        harness
    }

    /// Path of the kubeconfig file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Access that targets this file explicitly.
    #[must_use]
    pub fn access(&self) -> ConfigAccess {
        ConfigAccess::new(Some(self.path.clone()), None, None)
    }

    /// Load the file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read or parsed.
    #[must_use]
    pub fn load(&self) -> ConfigDocument {
        loader::load(&self.path).expect("failed to load kubeconfig")
    }

    /// Raw file contents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(&self.path).expect("failed to read kubeconfig")
    }
}

impl Default for TempKubeconfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output goes through the test harness capture.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
