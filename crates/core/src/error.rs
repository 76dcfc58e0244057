//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Missing required environment variables: {}. Please set these variables or create a .env file based on .env.example",
        .0.join(", ")
    )]
    MissingEnvVars(Vec<String>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to authenticate with Azure: {0}. Run `az login`, or configure a managed identity or service principal (AZURE_TENANT_ID, AZURE_CLIENT_ID, AZURE_CLIENT_SECRET)")]
    Authentication(String),

    #[error("SharePoint connection '{0}' not found. Please verify the connection name in your Azure AI Foundry project")]
    ConnectionNotFound(String),

    #[error("Agent Service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
