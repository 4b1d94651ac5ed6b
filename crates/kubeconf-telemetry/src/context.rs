//! Per-command log scope.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One CLI invocation: which command ran against which kubeconfig.
///
/// Invocations sharing a log directory are told apart by `invocation_id`.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Unique invocation identifier.
    pub invocation_id: Uuid,
    /// When the command started.
    pub started_at: DateTime<Utc>,
    /// Command name, e.g. `config set`.
    pub command: String,
    /// Kubeconfig file the command resolved to, if any.
    pub kubeconfig: Option<PathBuf>,
}

impl CommandContext {
    /// Start a context for `command`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            started_at: Utc::now(),
            command: command.into(),
            kubeconfig: None,
        }
    }

    /// Record the kubeconfig file in use.
    #[must_use]
    pub fn with_kubeconfig(mut self, file: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(file.into());
        self
    }

    /// Milliseconds since the command started.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        // started_at is taken at construction, so this never underflows
        #[allow(clippy::arithmetic_side_effects)]
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds()
    }

    /// First eight hex digits of the invocation id.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.invocation_id.simple().to_string().chars().take(8).collect()
    }

    fn span(&self) -> tracing::Span {
        let kubeconfig = self
            .kubeconfig
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        tracing::info_span!(
            "command",
            id = %self.short_id(),
            command = %self.command,
            kubeconfig = %kubeconfig,
        )
    }
}

/// Keeps the command span entered and logs the outcome on drop.
pub struct CommandGuard {
    context: CommandContext,
    failure: Option<String>,
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl CommandGuard {
    /// Enter the span for `context`.
    #[must_use]
    pub fn enter(context: CommandContext) -> Self {
        let span = context.span().entered();
        tracing::debug!("command started");
        Self {
            context,
            failure: None,
            span,
        }
    }

    /// Mark the command as failed. Logged when the guard drops.
    pub fn record_failure(&mut self, error: impl fmt::Display) {
        self.failure = Some(error.to_string());
    }
}

impl Drop for CommandGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.context.elapsed_ms();
        match &self.failure {
            Some(error) => tracing::debug!(elapsed_ms, error = %error, "command failed"),
            None => tracing::debug!(elapsed_ms, "command completed"),
        }
    }
}
