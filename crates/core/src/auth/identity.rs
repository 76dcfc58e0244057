//! Bridge from `azure_identity` credentials to [`TokenCredential`]

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use azure_core::auth::TokenCredential as AzureTokenCredential;
use chrono::{DateTime, Utc};

use super::credential::{AccessToken, TokenCredential};
use crate::{Error, Result};

/// One `azure_identity` credential exposed as a chain source
pub struct IdentityCredential {
    name: &'static str,
    inner: Arc<dyn AzureTokenCredential>,
}

impl IdentityCredential {
    pub fn new<C>(name: &'static str, credential: C) -> Self
    where
        C: AzureTokenCredential + 'static,
    {
        Self {
            name,
            inner: Arc::new(credential),
        }
    }
}

impl fmt::Debug for IdentityCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityCredential")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl TokenCredential for IdentityCredential {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn get_token(&self, scope: &str) -> Result<AccessToken> {
        let token = self
            .inner
            .get_token(&[scope])
            .await
            .map_err(|e| Error::authentication(e.to_string()))?;

        Ok(AccessToken::new(
            token.token.secret(),
            expiry_from_unix(token.expires_on.unix_timestamp()),
        ))
    }
}

/// Out-of-range expiries count as already expired so the token is never cached
fn expiry_from_unix(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
