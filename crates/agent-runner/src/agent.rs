//! SharePoint agent - drives one server-side agent through threads and runs

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use spf_core::agent::{Agent, AgentsApi, CreateAgentRequest, SharepointTool};
use spf_core::run::RunUsage;
use spf_core::thread::{MessageRole, UrlCitation};
use spf_core::Config;

use crate::error::Result;
use crate::poller::{wait_for_run, PollConfig};

/// Name used when the caller does not pick one
pub const DEFAULT_AGENT_NAME: &str = "sharepoint-agent";

/// Instructions used when the caller does not supply any
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful AI assistant specialized in analyzing SharePoint content. \
You can summarize documents, answer questions about SharePoint resources, and provide insights based on the content available. \
Always be thorough and provide specific references to the documents you analyze.";

/// Returned in place of content when a run completes without an assistant message
pub const NO_RESPONSE: &str = "No response received from agent";

/// Settings the agent needs from the loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Model deployment the server-side agent runs on
    pub model: String,
    /// SharePoint connection name to ground on
    pub connection_name: String,
    /// Run polling bounds
    pub poll: PollConfig,
}

impl AgentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model_deployment_name.clone(),
            connection_name: config.sharepoint_resource_name.clone(),
            poll: PollConfig::from_config(config),
        }
    }
}

/// Result of one completed query
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// Assistant reply text
    pub content: String,
    pub run_id: String,
    /// Thread the exchange happened on; pass it back to continue the conversation
    pub thread_id: String,
    /// Wall time from message post to reply
    pub elapsed: Duration,
    /// SharePoint documents the reply cites
    pub citations: Vec<UrlCitation>,
    pub usage: Option<RunUsage>,
}

/// Something that can answer a question, optionally on an existing thread
#[async_trait]
pub trait Responder: Send {
    async fn respond(&mut self, question: &str, thread_id: Option<&str>) -> Result<AgentResponse>;
}

/// Client-side handle on a SharePoint-grounded agent
pub struct SharePointAgent {
    api: Arc<dyn AgentsApi>,
    settings: AgentSettings,
    tool: Option<SharepointTool>,
    agent: Option<Agent>,
}

impl SharePointAgent {
    pub fn new(api: Arc<dyn AgentsApi>, settings: AgentSettings) -> Self {
        Self {
            api,
            settings,
            tool: None,
            agent: None,
        }
    }

    /// Id of the server-side agent, once created
    pub fn agent_id(&self) -> Option<&str> {
        self.agent.as_ref().map(|a| a.id.as_str())
    }

    /// Resolve the named SharePoint connection into a grounding tool
    pub async fn setup_sharepoint_tool(&mut self) -> Result<SharepointTool> {
        if let Some(tool) = &self.tool {
            return Ok(tool.clone());
        }

        let name = &self.settings.connection_name;
        info!("Resolving SharePoint connection '{}'", name);
        let connection = self.api.get_connection(name).await.map_err(|e| {
            error!("Failed to resolve SharePoint connection '{}': {}", name, e);
            e
        })?;
        debug!("Connection '{}' has id {}", connection.name, connection.id);

        let tool = SharepointTool::new(connection.id);
        self.tool = Some(tool.clone());
        Ok(tool)
    }

    /// Create the server-side agent with the SharePoint tool attached.
    ///
    /// Replaces any agent this handle created earlier.
    pub async fn create_agent(&mut self, name: &str, instructions: Option<&str>) -> Result<Agent> {
        let tool = self.setup_sharepoint_tool().await?;
        self.cleanup().await;

        let request = CreateAgentRequest {
            model: self.settings.model.clone(),
            name: name.to_string(),
            instructions: instructions.unwrap_or(DEFAULT_INSTRUCTIONS).to_string(),
            tools: tool.definitions(),
        };
        let agent = self.api.create_agent(&request).await?;
        info!("Created agent {} ({}) on model {}", agent.id, name, agent.model);

        self.agent = Some(agent.clone());
        Ok(agent)
    }

    /// Ask a question and wait for the reply.
    ///
    /// A new thread is created unless `thread_id` names an existing one.
    pub async fn query(&mut self, question: &str, thread_id: Option<&str>) -> Result<AgentResponse> {
        let agent_id = match self.agent_id() {
            Some(id) => id.to_string(),
            None => self.create_agent(DEFAULT_AGENT_NAME, None).await?.id,
        };

        let started = Instant::now();
        let thread_id = match thread_id {
            Some(id) => id.to_string(),
            None => {
                let thread = self.api.create_thread().await?;
                debug!("Created thread {}", thread.id);
                thread.id
            }
        };

        self.api
            .create_message(&thread_id, MessageRole::User, question)
            .await?;
        let run = self.api.create_run(&thread_id, &agent_id).await?;
        info!("Started run {} on thread {}", run.id, thread_id);

        let run = wait_for_run(self.api.as_ref(), &thread_id, &run.id, self.settings.poll).await?;

        let messages = self.api.list_messages(&thread_id).await?;
        let reply = messages
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .filter(|m| m.run_id.as_deref() == Some(run.id.as_str()))
            .find(|m| m.text().is_some());

        let (content, citations) = match reply {
            Some(message) => (
                message.text().unwrap_or_default().to_string(),
                message.citations(),
            ),
            None => {
                warn!("Run {} completed without an assistant message", run.id);
                (NO_RESPONSE.to_string(), Vec::new())
            }
        };

        let elapsed = started.elapsed();
        info!(
            "Run {} completed in {:.2}s ({} chars, {} citations)",
            run.id,
            elapsed.as_secs_f64(),
            content.len(),
            citations.len()
        );

        Ok(AgentResponse {
            content,
            run_id: run.id,
            thread_id,
            elapsed,
            citations,
            usage: run.usage,
        })
    }

    /// Delete the server-side agent, if any
    pub async fn cleanup(&mut self) {
        if let Some(agent) = self.agent.take() {
            match self.api.delete_agent(&agent.id).await {
                Ok(()) => info!("Deleted agent {}", agent.id),
                Err(e) => warn!("Failed to delete agent {}: {}", agent.id, e),
            }
        }
    }
}

#[async_trait]
impl Responder for SharePointAgent {
    async fn respond(&mut self, question: &str, thread_id: Option<&str>) -> Result<AgentResponse> {
        self.query(question, thread_id).await
    }
}
