//! Kubeconfig file discovery, loading and persistence.
//!
//! File selection follows `kubectl`:
//! 1. `--kubeconfig <file>` if given
//! 2. `KUBECONFIG` (path list): the first entry that exists, else the last
//!    entry
//! 3. `~/.kube/config`
//!
//! Only one file is read and written; `KUBECONFIG` lists are not merged.

use std::ffi::OsString;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::ConfigDocument;

/// Environment variable holding a list of kubeconfig paths.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Maximum allowed kubeconfig file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Resolves which kubeconfig file a command reads and writes.
#[derive(Debug, Clone, Default)]
pub struct ConfigAccess {
    explicit: Option<PathBuf>,
    env_paths: Vec<PathBuf>,
    home: Option<PathBuf>,
}

impl ConfigAccess {
    /// Build from explicit inputs. `env_value` is the raw `KUBECONFIG` value;
    /// `home` is the user's home directory.
    #[must_use]
    pub fn new(
        explicit: Option<PathBuf>,
        env_value: Option<OsString>,
        home: Option<PathBuf>,
    ) -> Self {
        let env_paths = env_value
            .map(|raw| {
                std::env::split_paths(&raw)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            explicit: explicit.filter(|p| !p.as_os_str().is_empty()),
            env_paths,
            home,
        }
    }

    /// Build from the process environment and the current user's home.
    #[must_use]
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self::new(
            explicit,
            std::env::var_os(KUBECONFIG_ENV),
            home_directory().ok(),
        )
    }

    /// Whether a file was named on the command line.
    #[must_use]
    pub fn is_explicit_file(&self) -> bool {
        self.explicit.is_some()
    }

    /// The file named on the command line, if any.
    #[must_use]
    pub fn explicit_file(&self) -> Option<&Path> {
        self.explicit.as_deref()
    }

    /// Entries from `KUBECONFIG`, in order.
    #[must_use]
    pub fn env_paths(&self) -> &[PathBuf] {
        &self.env_paths
    }

    /// `~/.kube/config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if the home directory is unknown.
    pub fn global_file(&self) -> ConfigResult<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(".kube").join("config"))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// The file to read and write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if no file was named and the home
    /// directory is unknown.
    pub fn default_filename(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Some(existing) = self.env_paths.iter().find(|p| p.exists()) {
            return Ok(existing.clone());
        }
        if let Some(last) = self.env_paths.last() {
            return Ok(last.clone());
        }
        self.global_file()
    }

    /// Load the selected file. A missing file loads as an empty document.
    ///
    /// # Errors
    ///
    /// See [`load`].
    pub fn starting_config(&self) -> ConfigResult<(PathBuf, ConfigDocument)> {
        let path = self.default_filename()?;
        let doc = load(&path)?;
        Ok((path, doc))
    }

    /// Load, mutate with `f`, and persist the selected file.
    ///
    /// Nothing is written if `f` fails.
    ///
    /// # Errors
    ///
    /// Returns the first error from loading, `f`, or persisting.
    pub fn modify_config<T, F>(&self, f: F) -> ConfigResult<(PathBuf, T)>
    where
        F: FnOnce(&mut ConfigDocument) -> ConfigResult<T>,
    {
        let (path, mut doc) = self.starting_config()?;
        let out = f(&mut doc)?;
        persist(&path, &doc)?;
        Ok((path, out))
    }
}

/// Load a kubeconfig file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure,
/// [`ConfigError::ValidationError`] for files over 1 MB, and
/// [`ConfigError::ParseError`] for malformed YAML.
pub fn load(path: &Path) -> ConfigResult<ConfigDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "kubeconfig not found, starting empty");
            return Ok(ConfigDocument::default());
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    // Check size after reading to avoid TOCTOU between stat and read.
    let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {size} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }

    let doc = from_yaml(&content).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;
    debug!(
        path = %path.display(),
        clusters = doc.clusters.len(),
        contexts = doc.contexts.len(),
        users = doc.auth_infos.len(),
        "loaded kubeconfig"
    );
    Ok(doc)
}

/// Write `doc` to `path`, replacing the file atomically.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`ConfigError::SerializeError`] or [`ConfigError::WriteError`].
pub fn persist(path: &Path, doc: &ConfigDocument) -> ConfigResult<()> {
    let yaml = to_yaml(doc)?;
    let write_err = |source: std::io::Error| ConfigError::WriteError {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(yaml.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), "wrote kubeconfig");
    Ok(())
}

/// Render a document in the on-disk format.
///
/// # Errors
///
/// Returns [`ConfigError::SerializeError`] if serialization fails.
pub fn to_yaml(doc: &ConfigDocument) -> ConfigResult<String> {
    serde_yaml::to_string(doc).map_err(|source| ConfigError::SerializeError { source })
}

/// Parse a document from the on-disk format. Empty input is an empty
/// document.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed YAML.
pub fn from_yaml(content: &str) -> ConfigResult<ConfigDocument> {
    if content.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }
    serde_yaml::from_str(content).map_err(|source| ConfigError::ParseError {
        path: "<inline>".to_owned(),
        source,
    })
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cluster;

    fn env_list<P: AsRef<std::ffi::OsStr>>(paths: &[P]) -> OsString {
        std::env::join_paths(paths).unwrap()
    }

    #[test]
    fn test_explicit_file_wins() {
        let access = ConfigAccess::new(
            Some(PathBuf::from("/explicit")),
            Some(OsString::from("/from-env")),
            Some(PathBuf::from("/home/u")),
        );
        assert!(access.is_explicit_file());
        assert_eq!(access.default_filename().unwrap(), PathBuf::from("/explicit"));
    }

    #[test]
    fn test_kubeconfig_first_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let present = dir.path().join("present");
        let also_present = dir.path().join("also-present");
        std::fs::write(&present, "").unwrap();
        std::fs::write(&also_present, "").unwrap();

        let access = ConfigAccess::new(
            None,
            Some(env_list(&[&missing, &present, &also_present])),
            None,
        );
        assert_eq!(access.env_paths().len(), 3);
        assert_eq!(access.default_filename().unwrap(), present);
    }

    #[test]
    fn test_kubeconfig_falls_back_to_last_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let access = ConfigAccess::new(None, Some(env_list(&[&a, &b])), None);
        assert_eq!(access.default_filename().unwrap(), b);
    }

    #[test]
    fn test_home_fallback() {
        let access = ConfigAccess::new(None, None, Some(PathBuf::from("/home/u")));
        assert!(!access.is_explicit_file());
        assert_eq!(
            access.default_filename().unwrap(),
            PathBuf::from("/home/u/.kube/config")
        );
    }

    #[test]
    fn test_no_home_dir() {
        let access = ConfigAccess::new(None, Some(OsString::new()), None);
        assert!(matches!(
            access.default_filename(),
            Err(ConfigError::NoHomeDir)
        ));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load(&dir.path().join("nope")).unwrap();
        assert_eq!(doc, ConfigDocument::default());
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "clusters: [unclosed").unwrap();
        let err = load(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::ParseError { ref path, .. } if path.ends_with("config"))
        );
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge");
        let data = "current-context: ".to_owned() + &"a".repeat(1_100_000);
        std::fs::write(&path, data).unwrap();

        let result = load(&path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }

    #[test]
    fn test_persist_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".kube").join("config");

        let mut doc = ConfigDocument::default();
        doc.current_context = "dev".to_owned();
        doc.clusters.insert(
            "dev".to_owned(),
            Cluster {
                server: "https://dev".to_owned(),
                ..Cluster::default()
            },
        );
        persist(&path, &doc).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("kind: Config"));
        assert_eq!(load(&path).unwrap(), doc);
    }

    #[test]
    fn test_modify_config_skips_write_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        let access = ConfigAccess::new(Some(path.clone()), None, None);

        let result: ConfigResult<(PathBuf, ())> = access.modify_config(|_| {
            Err(ConfigError::ValidationError {
                field: "x".to_owned(),
                message: "nope".to_owned(),
            })
        });
        assert!(result.is_err());
        assert!(!path.exists());

        let (written, ()) = access
            .modify_config(|doc| {
                doc.current_context = "ctx".to_owned();
                Ok(())
            })
            .unwrap();
        assert_eq!(written, path);
        assert_eq!(load(&path).unwrap().current_context, "ctx");
    }

    #[test]
    fn test_from_yaml_empty_input() {
        assert_eq!(from_yaml("  \n").unwrap(), ConfigDocument::default());
    }
}
