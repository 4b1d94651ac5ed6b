//! Kubeconf Telemetry - logging and invocation tracing for the kubeconf CLI.
//!
//! This crate provides:
//! - `tracing` subscriber setup writing to stderr or rolling files
//! - A per-command context that scopes log lines to one invocation
//!
//! # Example
//!
//! ```rust,no_run
//! use kubeconf_telemetry::{CommandContext, CommandGuard, LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), kubeconf_telemetry::TelemetryError> {
//! let config = LogConfig::new("warn")
//!     .with_format(LogFormat::Compact)
//!     .with_directives_from("kubeconf_config=debug");
//!
//! setup_logging(&config)?;
//!
//! let _guard = CommandGuard::enter(CommandContext::new("config set"));
//! tracing::info!("setting property");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod context;
mod error;
mod logging;

pub use context::{CommandContext, CommandGuard};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{FileRotation, LogConfig, LogFormat, LogTarget, setup_logging};
