//! Azure AI Foundry project client
//!
//! Talks to the Agent Service REST API under the project endpoint, e.g.
//! `https://<resource>.services.ai.azure.com/api/projects/<project>`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::api::AgentsApi;
use super::model::{Agent, Connection, CreateAgentRequest};
use crate::auth::{TokenCredential, AGENT_SERVICE_SCOPE};
use crate::run::{CreateRunRequest, Run};
use crate::thread::{CreateMessageRequest, MessageRole, Thread, ThreadMessage};
use crate::{Error, Result};

const API_VERSION: &str = "v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// REST client for one Foundry project
pub struct ProjectClient {
    http: Client,
    endpoint: String,
    credential: Arc<dyn TokenCredential>,
}

impl ProjectClient {
    /// Create a client for `endpoint` authenticating with `credential`
    pub fn new(endpoint: impl Into<String>, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sharepoint-agent/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, endpoint, credential))
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_http_client(
        http: Client,
        endpoint: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.credential.get_token(AGENT_SERVICE_SCOPE).await?;
        Ok(self
            .http
            .request(method, format!("{}/{}", self.endpoint, path))
            .query(&[("api-version", API_VERSION)])
            .bearer_auth(token.token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Self::status_error(status, &body))
    }

    fn status_error(status: StatusCode, body: &str) -> Error {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.code.is_empty() => {
                format!("{}: {}", envelope.error.code, envelope.error.message)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => body.trim().to_string(),
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Error::authentication(format!(
                "Agent Service rejected the credential (HTTP {}): {}",
                status.as_u16(),
                message
            ));
        }
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl AgentsApi for ProjectClient {
    async fn get_connection(&self, name: &str) -> Result<Connection> {
        let path = format!("connections/{}", urlencoding::encode(name));
        let request = self.request(Method::GET, &path).await?;

        match self.send::<Connection>(request).await {
            Ok(connection) => {
                debug!("Resolved connection {} to {}", name, connection.id);
                Ok(connection)
            }
            Err(Error::Api { status: 404, .. }) => {
                warn!("Connection '{}' does not exist in {}", name, self.endpoint);
                Err(Error::ConnectionNotFound(name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        let builder = self.request(Method::POST, "assistants").await?.json(request);
        self.send(builder).await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        let builder = self
            .request(Method::DELETE, &format!("assistants/{}", agent_id))
            .await?;
        self.send::<serde_json::Value>(builder).await?;
        Ok(())
    }

    async fn create_thread(&self) -> Result<Thread> {
        let builder = self
            .request(Method::POST, "threads")
            .await?
            .json(&serde_json::json!({}));
        self.send(builder).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        let builder = self
            .request(Method::POST, &format!("threads/{}/messages", thread_id))
            .await?
            .json(&CreateMessageRequest { role, content });
        self.send(builder).await
    }

    async fn create_run(&self, thread_id: &str, agent_id: &str) -> Result<Run> {
        let builder = self
            .request(Method::POST, &format!("threads/{}/runs", thread_id))
            .await?
            .json(&CreateRunRequest {
                assistant_id: agent_id,
            });
        self.send(builder).await
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let builder = self
            .request(Method::GET, &format!("threads/{}/runs/{}", thread_id, run_id))
            .await?;
        self.send(builder).await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let builder = self
            .request(Method::GET, &format!("threads/{}/messages", thread_id))
            .await?
            .query(&[("order", "desc")]);
        let list: ListResponse<ThreadMessage> = self.send(builder).await?;
        Ok(list.data)
    }
}
