//! Log subscriber setup for the CLI.
//!
//! Output goes to stderr or to rolling files so stdout only ever carries
//! command output.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn invalid_directive(directive: &str, e: impl std::fmt::Display) -> TelemetryError {
    TelemetryError::InvalidDirective {
        directive: directive.to_owned(),
        message: e.to_string(),
    }
}

/// File rotation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileRotation {
    /// Rotate daily.
    #[default]
    Daily,
    /// Rotate hourly.
    Hourly,
    /// Never rotate.
    Never,
}

impl From<FileRotation> for Rotation {
    fn from(rotation: FileRotation) -> Self {
        match rotation {
            FileRotation::Daily => Rotation::DAILY,
            FileRotation::Hourly => Rotation::HOURLY,
            FileRotation::Never => Rotation::NEVER,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format.
    Pretty,
    /// Compact single-line format.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
    /// Single-line format with every span field.
    Full,
}

impl LogFormat {
    /// Parse a `--log-format` value. Unknown names fall back to compact.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            "full" => Self::Full,
            _ => Self::Compact,
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Rolling files in `directory`, named `<prefix>.<date>`.
    File {
        /// Directory holding the log files. Created on setup.
        directory: PathBuf,
        /// File name prefix.
        prefix: String,
        /// Rotation strategy.
        rotation: FileRotation,
    },
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base level filter, e.g. `warn` or `debug`.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Output target.
    pub target: LogTarget,
    /// Include source file and line.
    pub source_locations: bool,
    /// Colorize output. Off for file targets.
    pub ansi: bool,
    /// Extra directives such as `kubeconf_config=debug`.
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            source_locations: false,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a config at `level` writing to stderr.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Set the line format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to rolling files in `directory` instead of stderr.
    #[must_use]
    pub fn with_file_logging(
        mut self,
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
        rotation: FileRotation,
    ) -> Self {
        self.target = LogTarget::File {
            directory: directory.into(),
            prefix: prefix.into(),
            rotation,
        };
        self.ansi = false;
        self
    }

    /// Include source file and line in each line.
    #[must_use]
    pub fn with_source_locations(mut self) -> Self {
        self.source_locations = true;
        self
    }

    /// Add comma-separated directives, e.g. the value of `KUBECONF_LOG`.
    /// Blank entries are skipped.
    #[must_use]
    pub fn with_directives_from(mut self, raw: &str) -> Self {
        self.directives.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_owned),
        );
        self
    }

    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| invalid_directive(&self.level, e))?;
        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| invalid_directive(directive, e),
            )?);
        }
        Ok(filter)
    }

    fn fmt_layer<W>(&self, writer: W) -> BoxedLayer
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.ansi)
            .with_file(self.source_locations)
            .with_line_number(self.source_locations);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
        }
    }

    fn build_layer(&self) -> TelemetryResult<BoxedLayer> {
        let filter = self.build_filter()?;

        let layer = match &self.target {
            LogTarget::Stderr => self.fmt_layer(std::io::stderr),
            LogTarget::File {
                directory,
                prefix,
                rotation,
            } => {
                std::fs::create_dir_all(directory).map_err(|source| {
                    TelemetryError::LogDirectory {
                        path: directory.clone(),
                        source,
                    }
                })?;
                self.fmt_layer(RollingFileAppender::new((*rotation).into(), directory, prefix))
            },
        };

        Ok(layer.with_filter(filter).boxed())
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if a directive is invalid, the log directory cannot be
/// created, or a global subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let layer = config.build_layer()?;
    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.ansi);
        assert!(!config.source_locations);
    }

    #[test]
    fn test_log_format_from_name() {
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("Pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name("full"), LogFormat::Full);
        assert_eq!(LogFormat::from_name("bogus"), LogFormat::Compact);
    }

    #[test]
    fn test_directives_from_env_value() {
        let config = LogConfig::default().with_directives_from(" kubeconf=debug, ,tracing=off");
        assert_eq!(config.directives, vec!["kubeconf=debug", "tracing=off"]);
    }

    #[test]
    fn test_file_logging_disables_ansi() {
        let config = LogConfig::default().with_file_logging("/tmp/logs", "kc", FileRotation::Never);
        assert_eq!(config.target, LogTarget::File {
            directory: PathBuf::from("/tmp/logs"),
            prefix: "kc".to_owned(),
            rotation: FileRotation::Never,
        });
        assert!(!config.ansi);
    }

    #[test]
    fn test_invalid_directive_is_reported() {
        let config = LogConfig::new("debug").with_directives_from("[invalid=syntax");
        let err = config.build_filter().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::InvalidDirective { ref directive, .. } if directive == "[invalid=syntax"
        ));
    }

    #[test]
    fn test_build_layer_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let config = LogConfig::default().with_file_logging(&logs, "kubeconf", FileRotation::Daily);

        assert!(config.build_layer().is_ok());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_build_layer_reports_unusable_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config =
            LogConfig::default().with_file_logging(blocker.join("logs"), "kc", FileRotation::Never);

        let err = config.build_layer().err().unwrap();
        assert!(matches!(err, TelemetryError::LogDirectory { .. }));
        assert!(err.to_string().contains("failed to create log directory"));
    }

    #[test]
    fn test_build_layer_every_format() {
        for format in [
            LogFormat::Pretty,
            LogFormat::Compact,
            LogFormat::Json,
            LogFormat::Full,
        ] {
            let config = LogConfig::default().with_format(format);
            assert!(config.build_layer().is_ok());
            assert!(config.with_source_locations().build_layer().is_ok());
        }
    }
}
