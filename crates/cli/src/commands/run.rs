//! Scripted demo run

use anyhow::Result;
use tracing::info;

use agent_runner::SharePointAgent;
use spf_core::Config;

use super::{build_agent, print_response};

pub(crate) const DEMO_PROMPTS: [&str; 3] = [
    "Hello, can you help me summarize key points from SharePoint documents?",
    "What types of documents are available in our SharePoint resources?",
    "Can you provide insights from the most recent documents?",
];

pub async fn execute(config: &Config, prompt: Option<String>) -> Result<()> {
    let prompts: Vec<String> = match prompt {
        Some(prompt) => vec![prompt],
        None => DEMO_PROMPTS.iter().map(|p| p.to_string()).collect(),
    };

    println!("SharePoint Agent");
    println!("{}", "=".repeat(50));

    run_prompts(build_agent(config)?, &prompts).await
}

/// Ask every prompt, then delete the server-side agent whatever the outcome
async fn run_prompts(mut agent: SharePointAgent, prompts: &[String]) -> Result<()> {
    let result = ask_all(&mut agent, prompts).await;
    agent.cleanup().await;
    result
}

async fn ask_all(agent: &mut SharePointAgent, prompts: &[String]) -> Result<()> {
    for (i, prompt) in prompts.iter().enumerate() {
        println!("\n[{}/{}] Query: {}", i + 1, prompts.len(), prompt);
        println!("{}", "-".repeat(40));

        let response = agent.query(prompt, None).await?;
        print_response(&response);
    }

    info!("Answered {} prompts", prompts.len());
    Ok(())
}
