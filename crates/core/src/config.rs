//! Agent configuration
//!
//! Settings are read once at startup from the process environment (and an
//! optional `.env` file) into an immutable [`Config`] that is passed by
//! reference to everything that needs it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::{Error, Result};

pub const PROJECT_ENDPOINT: &str = "PROJECT_ENDPOINT";
pub const SHAREPOINT_RESOURCE_NAME: &str = "SHAREPOINT_RESOURCE_NAME";
pub const MODEL_DEPLOYMENT_NAME: &str = "MODEL_DEPLOYMENT_NAME";
pub const DEBUG_LOGGING: &str = "DEBUG_LOGGING";
pub const RUN_TIMEOUT_SECS: &str = "RUN_TIMEOUT_SECS";
pub const RUN_POLL_INTERVAL_MS: &str = "RUN_POLL_INTERVAL_MS";
pub const LOG_FILE: &str = "LOG_FILE";

const REQUIRED_VARS: [&str; 3] = [
    PROJECT_ENDPOINT,
    SHAREPOINT_RESOURCE_NAME,
    MODEL_DEPLOYMENT_NAME,
];

const DEFAULT_RUN_TIMEOUT_SECS: u64 = 300;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_LOG_FILE: &str = "sharepoint_agent.log";

/// Validated configuration for the SharePoint agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Azure AI Foundry project endpoint
    pub project_endpoint: String,
    /// Name of the SharePoint connection registered in the project
    pub sharepoint_resource_name: String,
    /// Model deployment the agent runs on
    pub model_deployment_name: String,
    /// Whether debug logging is enabled
    pub debug_logging: bool,
    /// Upper bound on how long a single run may take
    pub run_timeout: Duration,
    /// Sleep between run status polls
    pub poll_interval: Duration,
    /// Local log file
    pub log_file: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or any parent) is loaded
    /// first if one exists; variables already set in the environment win.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::invalid_config(format!("Failed to read .env file: {}", e))),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an explicit `.env` file.
    ///
    /// Entries in the file are exported into the process environment (so the
    /// credential sources see them too) without overriding variables that are
    /// already set.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| {
            Error::invalid_config(format!("Failed to read env file {:?}: {}", path, e))
        })?;
        debug!("Loaded environment from {:?}", path);
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| value(*key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingEnvVars(missing));
        }

        let project_endpoint = value(PROJECT_ENDPOINT).unwrap_or_default();
        validate_endpoint(&project_endpoint)?;

        let debug_logging = value(DEBUG_LOGGING)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let run_timeout = Duration::from_secs(parse_number(
            RUN_TIMEOUT_SECS,
            value(RUN_TIMEOUT_SECS),
            DEFAULT_RUN_TIMEOUT_SECS,
        )?);
        let poll_interval = Duration::from_millis(parse_number(
            RUN_POLL_INTERVAL_MS,
            value(RUN_POLL_INTERVAL_MS),
            DEFAULT_POLL_INTERVAL_MS,
        )?);

        let log_file = value(LOG_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            project_endpoint: project_endpoint.trim_end_matches('/').to_string(),
            sharepoint_resource_name: value(SHAREPOINT_RESOURCE_NAME).unwrap_or_default(),
            model_deployment_name: value(MODEL_DEPLOYMENT_NAME).unwrap_or_default(),
            debug_logging,
            run_timeout,
            poll_interval,
            log_file,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| {
        Error::invalid_config(format!("{} is not a valid URL ({}): {}", PROJECT_ENDPOINT, e, endpoint))
    })?;
    match url.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(Error::invalid_config(format!(
            "{} must use http or https, got '{}'",
            PROJECT_ENDPOINT, scheme
        ))),
    }
}

fn parse_number(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) => Err(Error::invalid_config(format!("{} must be greater than zero", key))),
            Ok(n) => Ok(n),
            Err(_) => Err(Error::invalid_config(format!(
                "{} must be a positive integer, got '{}'",
                key, raw
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (PROJECT_ENDPOINT, "https://test.services.ai.azure.com/api/projects/demo"),
            (SHAREPOINT_RESOURCE_NAME, "test-sp"),
            (MODEL_DEPLOYMENT_NAME, "test-model"),
        ]
    }

    #[test]
    fn test_config_initialization_success() {
        let config = Config::from_lookup(lookup_from(&required())).unwrap();
        assert_eq!(
            config.project_endpoint,
            "https://test.services.ai.azure.com/api/projects/demo"
        );
        assert_eq!(config.sharepoint_resource_name, "test-sp");
        assert_eq!(config.model_deployment_name, "test-model");
        assert!(!config.debug_logging);
        assert_eq!(config.run_timeout, Duration::from_secs(300));
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.log_file, PathBuf::from("sharepoint_agent.log"));
    }

    #[test]
    fn test_each_missing_variable_is_named() {
        for missing in REQUIRED_VARS {
            let pairs: Vec<_> = required()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();

            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            match &err {
                Error::MissingEnvVars(vars) => assert_eq!(vars, &vec![missing.to_string()]),
                e => panic!("Expected MissingEnvVars error, got: {:?}", e),
            }
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = required();
        pairs[1] = (SHAREPOINT_RESOURCE_NAME, "  ");

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains(SHAREPOINT_RESOURCE_NAME));
    }

    #[test]
    fn test_all_missing_listed_in_order() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains(
            "Missing required environment variables: PROJECT_ENDPOINT, SHAREPOINT_RESOURCE_NAME, MODEL_DEPLOYMENT_NAME"
        ));
    }

    #[test]
    fn test_debug_logging_flag() {
        let mut pairs = required();
        pairs.push((DEBUG_LOGGING, "TRUE"));
        assert!(Config::from_lookup(lookup_from(&pairs)).unwrap().debug_logging);

        let mut pairs = required();
        pairs.push((DEBUG_LOGGING, "yes"));
        assert!(!Config::from_lookup(lookup_from(&pairs)).unwrap().debug_logging);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut pairs = required();
        pairs[0] = (PROJECT_ENDPOINT, "not a url");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        pairs[0] = (PROJECT_ENDPOINT, "ftp://example.com");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mut pairs = required();
        pairs[0] = (PROJECT_ENDPOINT, "https://example.com/api/projects/p/");
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.project_endpoint, "https://example.com/api/projects/p");
    }

    #[test]
    fn test_poll_settings_override() {
        let mut pairs = required();
        pairs.push((RUN_TIMEOUT_SECS, "30"));
        pairs.push((RUN_POLL_INTERVAL_MS, "250"));
        pairs.push((LOG_FILE, "/tmp/agent.log"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.run_timeout, Duration::from_secs(30));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.log_file, PathBuf::from("/tmp/agent.log"));

        let mut pairs = required();
        pairs.push((RUN_TIMEOUT_SECS, "0"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = required();
        pairs.push((RUN_POLL_INTERVAL_MS, "fast"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_env_file_loading() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PROJECT_ENDPOINT=https://file-test.com").unwrap();
        writeln!(file, "SHAREPOINT_RESOURCE_NAME=file-sp").unwrap();
        writeln!(file, "MODEL_DEPLOYMENT_NAME=file-model").unwrap();

        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.project_endpoint, "https://file-test.com");
        assert_eq!(config.sharepoint_resource_name, "file-sp");
        assert_eq!(config.model_deployment_name, "file-model");
    }

    #[test]
    fn test_env_file_missing() {
        let err = Config::from_env_file("/nonexistent/.env").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
