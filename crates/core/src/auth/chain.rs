//! Ordered fallback over credential sources

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use azure_identity::{
    AppServiceManagedIdentityCredential, AzureCliCredential, ClientSecretCredential,
    TokenCredentialOptions, VirtualMachineManagedIdentityCredential,
};

use super::credential::{AccessToken, TokenCredential};
use super::identity::IdentityCredential;
use crate::{Error, Result};

/// Tokens are refreshed this long before they expire
const REFRESH_MARGIN_MINUTES: i64 = 5;

/// Tries each credential source in order and returns the first token obtained.
///
/// Tokens are cached per scope until shortly before expiry.
pub struct DefaultCredentialChain {
    sources: Vec<Arc<dyn TokenCredential>>,
    cache: Mutex<HashMap<String, AccessToken>>,
}

impl DefaultCredentialChain {
    pub fn new(sources: Vec<Arc<dyn TokenCredential>>) -> Self {
        Self {
            sources,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Standard chain: service principal (if configured), managed identity, Azure CLI
    pub fn from_env() -> Self {
        let options = TokenCredentialOptions::default();
        let mut sources: Vec<Arc<dyn TokenCredential>> = Vec::new();

        match ClientSecretCredential::create(options.clone()) {
            Ok(credential) => sources.push(Arc::new(IdentityCredential::new(
                "ClientSecretCredential",
                credential,
            ))),
            Err(e) => debug!("Skipping ClientSecretCredential: {}", e),
        }

        match AppServiceManagedIdentityCredential::create(options.clone()) {
            Ok(credential) => sources.push(Arc::new(IdentityCredential::new(
                "AppServiceManagedIdentityCredential",
                credential,
            ))),
            Err(e) => debug!("Skipping AppServiceManagedIdentityCredential: {}", e),
        }

        sources.push(Arc::new(IdentityCredential::new(
            "VirtualMachineManagedIdentityCredential",
            VirtualMachineManagedIdentityCredential::new(options),
        )));
        sources.push(Arc::new(IdentityCredential::new(
            "AzureCliCredential",
            AzureCliCredential::new(),
        )));

        Self::new(sources)
    }

    /// Names of the configured sources, in order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl TokenCredential for DefaultCredentialChain {
    fn name(&self) -> &'static str {
        "DefaultCredentialChain"
    }

    async fn get_token(&self, scope: &str) -> Result<AccessToken> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.get(scope) {
            if !token.expires_within(Duration::minutes(REFRESH_MARGIN_MINUTES)) {
                return Ok(token.clone());
            }
            debug!("Cached token for {} is about to expire, refreshing", scope);
        }

        let mut failures = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.get_token(scope).await {
                Ok(token) => {
                    info!(
                        "Acquired token via {} (expires {})",
                        source.name(),
                        token.expires_on
                    );
                    cache.insert(scope.to_string(), token.clone());
                    return Ok(token);
                }
                Err(e) => {
                    let reason = match e {
                        Error::Authentication(msg) => msg,
                        other => other.to_string(),
                    };
                    debug!("{} unavailable: {}", source.name(), reason);
                    failures.push(format!("{}: {}", source.name(), reason));
                }
            }
        }

        warn!("No credential source produced a token for {}", scope);
        Err(Error::authentication(format!(
            "no credential source succeeded [{}]",
            failures.join("; ")
        )))
    }
}
