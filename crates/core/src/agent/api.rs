//! Agent Service operations used by the orchestrator

use async_trait::async_trait;

use super::model::{Agent, Connection, CreateAgentRequest};
use crate::run::Run;
use crate::thread::{MessageRole, Thread, ThreadMessage};
use crate::Result;

/// Interface for the Agent Service calls the agent flow makes
#[async_trait]
pub trait AgentsApi: Send + Sync {
    /// Look up a project connection by name
    async fn get_connection(&self, name: &str) -> Result<Connection>;

    /// Create a server-side agent
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent>;

    /// Delete a server-side agent
    async fn delete_agent(&self, agent_id: &str) -> Result<()>;

    /// Create an empty conversation thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Post a message to a thread
    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage>;

    /// Start a run of an agent on a thread
    async fn create_run(&self, thread_id: &str, agent_id: &str) -> Result<Run>;

    /// Fetch the current state of a run
    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List thread messages, newest first
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;
}
