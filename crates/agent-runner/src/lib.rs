//! Agent Runner - conversation driver for SharePoint-grounded agents
//!
//! This crate turns the raw Agent Service calls from `spf-core` into
//! question/answer exchanges: it creates the agent, posts messages, polls
//! runs to completion and reads the reply. On top of that it provides the
//! interactive chat loop and the built-in use case scenarios.

mod agent;
mod conversation;
mod error;
mod interactive;
mod poller;
mod use_cases;

#[cfg(test)]
mod testing;

pub use agent::{
    AgentResponse, AgentSettings, Responder, SharePointAgent, DEFAULT_AGENT_NAME,
    DEFAULT_INSTRUCTIONS, NO_RESPONSE,
};
pub use conversation::{ConversationHistory, HistoryEntry};
pub use error::{Result, RunnerError};
pub use interactive::{ChatCommand, ChatSession, ChatSummary, HELP_TEXT};
pub use poller::{wait_for_run, PollConfig};
pub use use_cases::{
    find_use_case, run_use_case, OverallStats, QueryOutcome, UseCase, UseCaseReport, USE_CASES,
};
