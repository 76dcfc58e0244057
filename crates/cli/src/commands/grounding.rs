//! Single grounding query

use anyhow::Result;

use agent_runner::SharePointAgent;
use spf_core::Config;

use super::{build_agent, print_response};

const DEFAULT_QUERY: &str =
    "What documents are available in my SharePoint site? List them with their types and sizes.";

pub async fn execute(config: &Config, query: Option<String>) -> Result<()> {
    let query = query.unwrap_or_else(|| DEFAULT_QUERY.to_string());

    println!("SharePoint Grounding Check");
    println!("{}", "=".repeat(50));
    println!("Connection: {}", config.sharepoint_resource_name);
    println!("Query: {}", query);

    let mut agent = build_agent(config)?;
    let result = ground(&mut agent, &query).await;
    agent.cleanup().await;
    result
}

async fn ground(agent: &mut SharePointAgent, query: &str) -> Result<()> {
    let response = agent.query(query, None).await?;
    print_response(&response);
    println!("Thread: {}", response.thread_id);
    println!("Run: {}", response.run_id);

    if response.citations.is_empty() {
        println!("\nNo document citations were returned. The answer may not be grounded in SharePoint content.");
    }
    Ok(())
}
