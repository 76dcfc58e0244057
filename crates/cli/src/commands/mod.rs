//! Subcommand implementations

mod auth_check;
mod chat;
mod grounding;
mod run;
mod use_cases;

use std::sync::Arc;

use anyhow::Result;

use agent_runner::{AgentResponse, AgentSettings, SharePointAgent};
use spf_core::agent::ProjectClient;
use spf_core::auth::{DefaultCredentialChain, TokenCredential};
use spf_core::Config;

use crate::cli::Command;

/// Name of the agent created by the CLI commands
pub(crate) const CLI_AGENT_NAME: &str = "sharepoint-cli-agent";

pub(crate) const CLI_INSTRUCTIONS: &str = "You are a helpful SharePoint assistant. \
Provide clear, detailed responses about SharePoint content. \
Always cite specific documents when possible and be conversational in your tone.";

pub async fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Run { prompt } => run::execute(config, prompt).await,
        Command::Chat => chat::execute(config).await,
        Command::UseCases { name, list } => use_cases::execute(config, name, list).await,
        Command::AuthCheck => auth_check::execute(config).await,
        Command::Grounding { query } => grounding::execute(config, query).await,
    }
}

pub(crate) fn credential_chain() -> Arc<DefaultCredentialChain> {
    Arc::new(DefaultCredentialChain::from_env())
}

pub(crate) fn project_client(
    config: &Config,
    credential: Arc<dyn TokenCredential>,
) -> Result<Arc<ProjectClient>> {
    Ok(Arc::new(ProjectClient::new(
        config.project_endpoint.clone(),
        credential,
    )?))
}

/// Agent wired to the configured project; nothing is created server-side yet
pub(crate) fn build_agent(config: &Config) -> Result<SharePointAgent> {
    let client = project_client(config, credential_chain())?;
    Ok(SharePointAgent::new(client, AgentSettings::from_config(config)))
}

pub(crate) fn print_response(response: &AgentResponse) {
    println!("\nResponse: {}", response.content);
    if !response.citations.is_empty() {
        println!("\nSources:");
        for citation in &response.citations {
            match &citation.title {
                Some(title) => println!("  - {} ({})", title, citation.url),
                None => println!("  - {}", citation.url),
            }
        }
    }
    println!("Time: {:.2}s", response.elapsed.as_secs_f64());
}
