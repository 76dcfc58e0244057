//! Step-by-step authentication check

use anyhow::Result;
use tracing::{error, info};

use spf_core::agent::AgentsApi;
use spf_core::auth::{TokenCredential, AGENT_SERVICE_SCOPE};
use spf_core::Config;

use super::{credential_chain, project_client};

const CREDENTIAL_VARS: [&str; 3] = ["AZURE_TENANT_ID", "AZURE_CLIENT_ID", "AZURE_CLIENT_SECRET"];

pub async fn execute(config: &Config) -> Result<()> {
    println!("SharePoint Agent - Authentication Check");
    println!("{}", "=".repeat(60));

    println!("\nStep 1: Configuration");
    println!("   Project Endpoint: {}", config.project_endpoint);
    println!("   SharePoint Resource: {}", config.sharepoint_resource_name);
    println!("   Model Deployment: {}", config.model_deployment_name);

    println!("\nStep 2: Credential environment");
    for var in CREDENTIAL_VARS {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => println!("   {}: set ({} chars)", var, value.len()),
            _ => println!("   {}: not set", var),
        }
    }

    let chain = credential_chain();
    println!("   Credential sources: {}", chain.source_names().join(" -> "));

    println!("\nStep 3: Token acquisition");
    let token = match chain.get_token(AGENT_SERVICE_SCOPE).await {
        Ok(token) => token,
        Err(e) => {
            error!("Token acquisition failed: {}", e);
            println!("   Failed");
            println!("\nPossible solutions:");
            println!("   1. Run 'az login' to authenticate with Azure CLI");
            println!("   2. Set up Managed Identity if running on Azure");
            println!("   3. Set AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET");
            return Err(e.into());
        }
    };
    println!("   Token acquired, expires at {}", token.expires_on);

    println!("\nStep 4: SharePoint connection");
    let client = project_client(config, chain)?;
    let connection = client
        .get_connection(&config.sharepoint_resource_name)
        .await?;
    println!("   Connection id: {}", connection.id);
    println!(
        "   Connection type: {}",
        connection.connection_type.as_deref().unwrap_or("Unknown")
    );
    if let Some(target) = &connection.target {
        println!("   Target: {}", target);
    }

    info!("Authentication check passed for {}", config.project_endpoint);
    println!("\nAll authentication checks passed.");
    Ok(())
}
