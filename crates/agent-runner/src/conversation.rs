//! Per-session conversation history

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentResponse;

const QUERY_PREVIEW_CHARS: usize = 80;
const RESPONSE_PREVIEW_CHARS: usize = 100;

/// One question and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    /// Reply text, or the error message when the query failed
    pub response: String,
    pub success: bool,
    pub elapsed: Duration,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn query_preview(&self) -> String {
        preview(&self.query, QUERY_PREVIEW_CHARS)
    }

    pub fn response_preview(&self) -> String {
        preview(&self.response, RESPONSE_PREVIEW_CHARS)
    }
}

/// Ordered record of everything asked in a session
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, query: &str, response: &AgentResponse) {
        self.entries.push(HistoryEntry {
            query: query.to_string(),
            response: response.content.clone(),
            success: true,
            elapsed: response.elapsed,
            timestamp: Utc::now(),
        });
    }

    pub fn record_failure(&mut self, query: &str, error: &str, elapsed: Duration) {
        self.entries.push(HistoryEntry {
            query: query.to_string(),
            response: error.to_string(),
            success: false,
            elapsed,
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Truncate to `max` characters, marking the cut with "..."
pub(crate) fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
