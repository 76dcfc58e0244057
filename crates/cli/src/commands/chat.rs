//! Interactive chat

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use agent_runner::{ChatSession, SharePointAgent};
use spf_core::Config;

use super::{build_agent, CLI_AGENT_NAME, CLI_INSTRUCTIONS};

pub async fn execute(config: &Config) -> Result<()> {
    let mut agent = build_agent(config)?;
    let result = chat(&mut agent).await;
    println!("Cleaning up...");
    agent.cleanup().await;
    result
}

async fn chat(agent: &mut SharePointAgent) -> Result<()> {
    println!("Initializing SharePoint agent...");
    agent
        .create_agent(CLI_AGENT_NAME, Some(CLI_INSTRUCTIONS))
        .await?;
    println!("SharePoint agent ready!\n");

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let mut session = ChatSession::new();
    let summary = session.run(agent, input, &mut out).await?;

    info!(
        "Chat session {} finished: {} queries, {} failed",
        session.id(),
        summary.queries,
        summary.failures
    );
    Ok(())
}
