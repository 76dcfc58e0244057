//! Tracing setup
//!
//! Everything goes to the log file; the console only shows warnings unless
//! debug logging is on, so it does not interleave with chat output.
//! `RUST_LOG` overrides the default filter.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spf_core::{config, Config};

const CRATES: [&str; 3] = ["sharepoint_agent", "agent_runner", "spf_core"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_config(config: &Config, debug_flag: bool) -> Self {
        Self {
            debug: debug_flag || config.debug_logging,
            log_file: Some(config.log_file.clone()),
        }
    }

    /// Logging for when the configuration itself failed to load.
    ///
    /// `LOG_FILE` is honoured if set, otherwise the default log file is used.
    pub fn fallback(debug_flag: bool) -> Self {
        let log_file = std::env::var(config::LOG_FILE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| config::DEFAULT_LOG_FILE.to_string());
        Self {
            debug: debug_flag,
            log_file: Some(PathBuf::from(log_file)),
        }
    }

    /// Default filter directives
    pub fn directives(&self) -> String {
        let level = if self.debug { "debug" } else { "info" };
        let mut directives: Vec<String> = CRATES.iter().map(|c| format!("{}={}", c, level)).collect();
        directives.push("warn".to_string());
        directives.join(",")
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    let console_level = if config.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.debug)
        .with_filter(console_level);

    let file = config.log_file.as_ref().and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false)),
            Err(e) => {
                eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
                None
            }
        }
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(debug_logging: bool) -> Config {
        Config {
            project_endpoint: "https://example.com".to_string(),
            sharepoint_resource_name: "sp".to_string(),
            model_deployment_name: "model".to_string(),
            debug_logging,
            run_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(1),
            log_file: PathBuf::from("agent.log"),
        }
    }

    #[test]
    fn test_default_directives() {
        let log = LogConfig::from_config(&config(false), false);
        assert!(!log.debug);
        assert_eq!(
            log.directives(),
            "sharepoint_agent=info,agent_runner=info,spf_core=info,warn"
        );
        assert_eq!(log.log_file, Some(PathBuf::from("agent.log")));
    }

    #[test]
    fn test_debug_from_env_or_flag() {
        assert!(LogConfig::from_config(&config(true), false).debug);
        assert!(LogConfig::from_config(&config(false), true).debug);
        assert!(LogConfig::from_config(&config(true), false)
            .directives()
            .starts_with("sharepoint_agent=debug"));
    }

    #[test]
    fn test_fallback_still_logs_to_file() {
        let log = LogConfig::fallback(true);
        assert!(log.debug);
        let expected = std::env::var(config::LOG_FILE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "sharepoint_agent.log".to_string());
        assert_eq!(log.log_file, Some(PathBuf::from(expected)));
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.log");
        init(&LogConfig {
            debug: false,
            log_file: Some(path.clone()),
        });
        assert!(path.exists());
    }
}
