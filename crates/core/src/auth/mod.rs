//! Azure credential resolution
//!
//! The Agent Service accepts Entra ID bearer tokens. Tokens come from
//! `azure_identity` credentials tried in order, mirroring the usual Azure
//! "default credential" lookup:
//! - service principal secret from the environment
//! - managed identity (App Service, then the VM metadata endpoint)
//! - the signed-in Azure CLI account

mod chain;
mod credential;
mod identity;

pub use chain::DefaultCredentialChain;
pub use credential::{AccessToken, TokenCredential};
pub use identity::IdentityCredential;

/// Token scope for the Azure AI Foundry Agent Service
pub const AGENT_SERVICE_SCOPE: &str = "https://ai.azure.com/.default";
