//! Agent, connection and tool wire types

use serde::{Deserialize, Serialize};

/// A connection registered in the Foundry project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Fully qualified connection resource ID
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Reference from a tool to a project connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConnection {
    pub connection_id: String,
}

/// SharePoint grounding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharepointGroundingParams {
    pub connections: Vec<ToolConnection>,
}

/// Tool definition attached to an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    SharepointGrounding {
        sharepoint_grounding: SharepointGroundingParams,
    },
    /// Tools this client does not configure itself
    #[serde(other)]
    Unsupported,
}

/// SharePoint document-search tool bound to one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharepointTool {
    connection_id: String,
}

impl SharepointTool {
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Tool definitions to send when creating an agent
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![ToolDefinition::SharepointGrounding {
            sharepoint_grounding: SharepointGroundingParams {
                connections: vec![ToolConnection {
                    connection_id: self.connection_id.clone(),
                }],
            },
        }]
    }
}

/// Body of a create-agent request
#[derive(Debug, Clone, Serialize)]
pub struct CreateAgentRequest {
    pub model: String,
    pub name: String,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
}

/// A server-side agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    #[serde(default)]
    pub created_at: i64,
}
