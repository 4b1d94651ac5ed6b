use std::io;
use thiserror::Error;

/// Failure to parse a property path or to apply it to a document.
///
/// None of these are retriable: they describe a malformed path or a mismatch
/// between the path and the shape of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path contains an empty segment (empty string, leading, trailing
    /// or doubled separator).
    #[error("empty property name at position {position}")]
    EmptySegment {
        /// Zero-based segment index.
        position: usize,
    },

    /// A segment does not name a property of the record it addresses.
    #[error("unknown property '{property}' at position {position}")]
    UnknownProperty {
        /// The segment as written.
        property: String,
        /// Zero-based segment index.
        position: usize,
    },

    /// The path continues past a leaf value.
    #[error("property '{property}' at position {position} is below a leaf value")]
    PathTooDeep {
        /// The first segment that could not be resolved.
        property: String,
        /// Zero-based segment index.
        position: usize,
    },

    /// The value's kind does not match the kind declared at the path.
    #[error("cannot assign {actual} to '{path}': expected {expected}")]
    TypeMismatch {
        /// Dotted path of the target.
        path: String,
        /// What the target holds.
        expected: String,
        /// What was supplied.
        actual: String,
    },

    /// A mutation walk ended without reaching its target node.
    #[error("property '{path}' could not be resolved")]
    Unresolved {
        /// Dotted path of the target.
        path: String,
    },
}

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the kubeconfig file.
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse the kubeconfig YAML.
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to serialize a document to YAML.
    #[error("Failed to serialize config: {source}")]
    SerializeError {
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to write the kubeconfig file.
    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file or value was rejected before parsing.
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Field or file that failed validation.
        field: String,
        /// Validation failure description.
        message: String,
    },

    /// Could not determine home directory.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Property path error.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
