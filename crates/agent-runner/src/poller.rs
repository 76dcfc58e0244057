//! Run status polling
//!
//! Runs execute server-side; the client polls with a fixed interval until
//! the run reaches a terminal state or the deadline passes.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use spf_core::agent::AgentsApi;
use spf_core::run::{Run, RunStatus};
use spf_core::Config;

use crate::error::{Result, RunnerError};

/// Polling bounds for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Sleep between status checks
    pub interval: Duration,
    /// Give up after this long
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            timeout: config.run_timeout,
        }
    }
}

/// Poll a run until it completes.
///
/// Failed, cancelled and expired runs become [`RunnerError::RunFailed`];
/// `requires_action` becomes [`RunnerError::UnexpectedStatus`] since no
/// client-side tools are registered.
pub async fn wait_for_run(
    api: &dyn AgentsApi,
    thread_id: &str,
    run_id: &str,
    config: PollConfig,
) -> Result<Run> {
    let deadline = Instant::now() + config.timeout;
    let mut last_status = None;

    loop {
        let run = api.get_run(thread_id, run_id).await?;

        if last_status != Some(run.status) {
            debug!("Run {} is {}", run_id, run.status);
            last_status = Some(run.status);
        }

        match run.status {
            RunStatus::Completed => return Ok(run),
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                let reason = run.failure_reason();
                warn!("Run {} ended as {}: {}", run_id, run.status, reason);
                return Err(RunnerError::run_failed(run.id, run.status, reason));
            }
            RunStatus::RequiresAction => {
                return Err(RunnerError::UnexpectedStatus {
                    run_id: run.id,
                    status: run.status,
                });
            }
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling | RunStatus::Unknown => {}
        }

        let now = Instant::now();
        if now >= deadline {
            warn!(
                "Run {} still {} after {:?}, giving up",
                run_id, run.status, config.timeout
            );
            return Err(RunnerError::Timeout {
                run_id: run_id.to_string(),
                timeout: config.timeout,
            });
        }

        tokio::time::sleep(config.interval.min(deadline - now)).await;
    }
}
