//! Error types for agent-runner

use std::time::Duration;

use spf_core::run::RunStatus;
use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that can occur while driving an agent conversation
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration, credential, connection or transport failure
    #[error(transparent)]
    Core(#[from] spf_core::Error),

    /// The run ended in a failed, cancelled or expired state
    #[error("Agent run {run_id} {status}: {reason}")]
    RunFailed {
        run_id: String,
        status: RunStatus,
        reason: String,
    },

    /// The run stopped in a state this client cannot progress
    #[error("Unexpected run status for {run_id}: {status}")]
    UnexpectedStatus { run_id: String, status: RunStatus },

    /// Polling exceeded the configured bound
    #[error("Agent run {run_id} did not finish within {timeout:?}")]
    Timeout { run_id: String, timeout: Duration },

    /// Terminal IO failure in interactive mode
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Create a RunFailed error
    pub fn run_failed(run_id: impl Into<String>, status: RunStatus, reason: impl Into<String>) -> Self {
        Self::RunFailed {
            run_id: run_id.into(),
            status,
            reason: reason.into(),
        }
    }

    /// The underlying core error, if any
    pub fn as_core(&self) -> Option<&spf_core::Error> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the error invalidates the whole session rather than one query
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.as_core(),
            Some(
                spf_core::Error::MissingEnvVars(_)
                    | spf_core::Error::InvalidConfig(_)
                    | spf_core::Error::Authentication(_)
                    | spf_core::Error::ConnectionNotFound(_)
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RunnerError::run_failed("run_1", RunStatus::Failed, "rate_limit_exceeded: slow down");
        assert_eq!(
            err.to_string(),
            "Agent run run_1 failed: rate_limit_exceeded: slow down"
        );

        let err = RunnerError::Timeout {
            run_id: "run_2".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert!(err.to_string().ends_with("within 30s"));

        let err = RunnerError::Timeout {
            run_id: "run_3".to_string(),
            timeout: Duration::from_millis(250),
        };
        assert!(err.to_string().ends_with("within 250ms"));
    }

    #[test]
    fn test_fatal_classification() {
        let err: RunnerError = spf_core::Error::ConnectionNotFound("sp".to_string()).into();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("'sp' not found"));

        let err: RunnerError = spf_core::Error::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(!err.is_fatal());
        assert!(!RunnerError::run_failed("r", RunStatus::Cancelled, "x").is_fatal());
    }
}
