//! Kubeconf CLI - edit kubeconfig files by property path.
//!
//! A small `kubectl config` work-alike: every field of a kubeconfig file can
//! be read, set or unset through a dotted path such as
//! `clusters.prod.server`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kubeconf_config::ConfigAccess;
use kubeconf_telemetry::{CommandContext, CommandGuard, FileRotation, LogConfig, LogFormat};

mod commands;
mod theme;

use commands::config;
use theme::Theme;

/// Environment variable with extra log directives (e.g. `kubeconf_config=debug`).
const LOG_ENV: &str = "KUBECONF_LOG";

/// Kubeconf - edit kubeconfig files by property path
#[derive(Parser)]
#[command(name = "kubeconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the kubeconfig file to use
    #[arg(long, global = true, value_name = "FILE")]
    kubeconfig: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: compact (default), pretty, json or full
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    /// Write logs to files in this directory instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modify kubeconfig files
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Clear the current context and preferences and delete all clusters,
    /// contexts and users
    Reset,
    /// Set a property
    Set {
        /// Dotted property path, e.g. `clusters.prod.server`
        property: String,
        /// New value
        value: String,
        /// Store byte fields as given instead of base64-decoding them
        #[arg(long)]
        set_raw_bytes: bool,
    },
    /// Unset a property
    Unset {
        /// Dotted property path
        property: String,
    },
    /// Print a property
    Get {
        /// Dotted property path
        property: String,
    },
    /// Print the kubeconfig
    View,
    /// Print the current context
    CurrentContext,
}

impl ConfigCommands {
    fn operation(&self) -> &'static str {
        match self {
            Self::Reset => "config reset",
            Self::Set { .. } => "config set",
            Self::Unset { .. } => "config unset",
            Self::Get { .. } => "config get",
            Self::View => "config view",
            Self::CurrentContext => "config current-context",
        }
    }
}

fn log_config(cli: &Cli) -> LogConfig {
    let level = if cli.verbose { "debug" } else { "warn" };
    let mut config = LogConfig::new(level).with_format(LogFormat::from_name(&cli.log_format));
    if cli.verbose {
        config = config.with_source_locations();
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_file_logging(dir, "kubeconf", FileRotation::Daily);
    }
    if let Ok(raw) = std::env::var(LOG_ENV) {
        config = config.with_directives_from(&raw);
    }
    config
}

fn handle_config(access: &ConfigAccess, command: ConfigCommands, out: &mut impl Write) -> Result<()> {
    match command {
        ConfigCommands::Reset => config::reset(access, out),
        ConfigCommands::Set {
            property,
            value,
            set_raw_bytes,
        } => config::set(access, &property, &value, set_raw_bytes, out),
        ConfigCommands::Unset { property } => config::unset(access, &property, out),
        ConfigCommands::Get { property } => config::get(access, &property, out),
        ConfigCommands::View => config::view(access, out),
        ConfigCommands::CurrentContext => config::current_context(access, out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = kubeconf_telemetry::setup_logging(&log_config(&cli)) {
        eprintln!("{}", Theme::warning(&format!("failed to initialize logging: {e}")));
    }

    let access = ConfigAccess::from_env(cli.kubeconfig);
    let Commands::Config { command } = cli.command;

    let mut context = CommandContext::new(command.operation());
    if let Ok(file) = access.default_filename() {
        context = context.with_kubeconfig(file);
    }
    let mut guard = CommandGuard::enter(context);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match handle_config(&access, command, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            guard.record_failure(format!("{e:#}"));
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_set() {
        let cli = Cli::try_parse_from([
            "kubeconf",
            "--kubeconfig",
            "/tmp/kc",
            "config",
            "set",
            "clusters.a.certificate-authority-data",
            "abc",
            "--set-raw-bytes",
        ])
        .unwrap();
        assert_eq!(cli.kubeconfig, Some(PathBuf::from("/tmp/kc")));
        let Commands::Config { command } = cli.command;
        assert!(matches!(
            command,
            ConfigCommands::Set { ref property, set_raw_bytes: true, .. }
                if property == "clusters.a.certificate-authority-data"
        ));
    }

    #[test]
    fn test_cli_parses_current_context() {
        let cli = Cli::try_parse_from(["kubeconf", "config", "current-context", "-v"]).unwrap();
        assert!(cli.verbose);
        let Commands::Config { command } = cli.command;
        assert_eq!(command.operation(), "config current-context");
    }

    #[test]
    fn test_log_config_from_flags() {
        let cli = Cli::try_parse_from([
            "kubeconf",
            "--log-format",
            "json",
            "--log-dir",
            "/tmp/kubeconf-logs",
            "config",
            "view",
        ])
        .unwrap();
        let config = log_config(&cli);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
        assert!(!config.ansi);
        assert!(!config.source_locations);
    }

    #[test]
    fn test_log_config_verbose() {
        let cli = Cli::try_parse_from(["kubeconf", "-v", "config", "view"]).unwrap();
        let config = log_config(&cli);
        assert_eq!(config.level, "debug");
        assert!(config.source_locations);
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_handle_config_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let access = ConfigAccess::new(Some(dir.path().join("config")), None, None);
        let mut out = Vec::new();
        handle_config(
            &access,
            ConfigCommands::Set {
                property: "current-context".to_owned(),
                value: "dev".to_owned(),
                set_raw_bytes: false,
            },
            &mut out,
        )
        .unwrap();
        handle_config(&access, ConfigCommands::CurrentContext, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Property \"current-context\" set.\ndev\n"
        );
    }
}
