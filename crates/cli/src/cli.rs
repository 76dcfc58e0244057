//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sharepoint-agent",
    version,
    about = "Ask an Azure AI Foundry agent about your SharePoint content"
)]
pub struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Enable debug logging (same as DEBUG_LOGGING=true)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Ask the demo questions, or a single prompt, each on a fresh thread
    Run {
        /// Question to ask instead of the demo set
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Interactive chat session on a single thread
    Chat,

    /// Run the built-in business scenarios
    UseCases {
        /// Scenario to run (case-insensitive); all of them when omitted
        name: Option<String>,

        /// List the scenarios without running them
        #[arg(long)]
        list: bool,
    },

    /// Verify configuration, credentials and the SharePoint connection
    AuthCheck,

    /// Ask one grounding question and show where the answer came from
    Grounding {
        /// Question to ask instead of the default document listing
        #[arg(short, long)]
        query: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Run { prompt: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["sharepoint-agent"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Run { prompt: None });
        assert!(!cli.debug);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sharepoint-agent",
            "chat",
            "--debug",
            "--env-file",
            "prod.env",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Chat));
        assert!(cli.debug);
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
    }

    #[test]
    fn test_subcommand_arguments() {
        let cli = Cli::try_parse_from(["sharepoint-agent", "run", "-p", "What changed?"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Run {
                prompt: Some("What changed?".to_string())
            })
        );

        let cli = Cli::try_parse_from(["sharepoint-agent", "use-cases", "Content Discovery"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::UseCases {
                name: Some("Content Discovery".to_string()),
                list: false
            })
        );

        let cli = Cli::try_parse_from(["sharepoint-agent", "auth-check"]).unwrap();
        assert_eq!(cli.command, Some(Command::AuthCheck));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["sharepoint-agent", "deploy"]).is_err());
    }
}
