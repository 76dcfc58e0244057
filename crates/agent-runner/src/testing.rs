//! In-memory Agent Service used by the unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use spf_core::agent::{Agent, AgentsApi, Connection, CreateAgentRequest};
use spf_core::run::{Run, RunError, RunStatus};
use spf_core::thread::{MessageContent, MessageRole, TextContent, Thread, ThreadMessage};
use spf_core::{Error, Result};

pub(crate) struct MockAgentsApi {
    connection_exists: bool,
    statuses: Mutex<VecDeque<RunStatus>>,
    last_error: Option<RunError>,
    reply: Option<String>,
    stale_reply: bool,
    calls: Mutex<Vec<String>>,
    threads: Mutex<u32>,
    runs: Mutex<u32>,
}

impl MockAgentsApi {
    /// Runs complete on the first poll and reply with `reply`
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            connection_exists: true,
            statuses: Mutex::new(VecDeque::from([RunStatus::Completed])),
            last_error: None,
            reply: Some(reply.to_string()),
            stale_reply: false,
            calls: Mutex::new(Vec::new()),
            threads: Mutex::new(0),
            runs: Mutex::new(0),
        }
    }

    pub(crate) fn without_connection(mut self) -> Self {
        self.connection_exists = false;
        self
    }

    /// Statuses returned by successive polls; the last one repeats forever
    pub(crate) fn with_statuses(self, statuses: &[RunStatus]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub(crate) fn with_last_error(mut self, code: &str, message: &str) -> Self {
        self.last_error = Some(RunError {
            code: code.to_string(),
            message: message.to_string(),
        });
        self
    }

    pub(crate) fn without_reply(mut self) -> Self {
        self.reply = None;
        self
    }

    /// The thread only holds a reply written by an earlier run
    pub(crate) fn with_stale_reply(mut self) -> Self {
        self.stale_reply = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap_or(RunStatus::Completed)
        } else {
            statuses.front().copied().unwrap_or(RunStatus::Completed)
        }
    }

    fn message(
        id: &str,
        thread_id: &str,
        role: MessageRole,
        text: &str,
        run_id: Option<String>,
    ) -> ThreadMessage {
        ThreadMessage {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            role,
            content: vec![MessageContent::Text {
                text: TextContent {
                    value: text.to_string(),
                    annotations: Vec::new(),
                },
            }],
            run_id,
            created_at: 0,
        }
    }

    fn run(&self, run_id: &str, thread_id: &str, status: RunStatus) -> Run {
        Run {
            id: run_id.to_string(),
            thread_id: thread_id.to_string(),
            assistant_id: "asst_1".to_string(),
            status,
            last_error: self.last_error.clone(),
            usage: None,
            created_at: 0,
            completed_at: None,
        }
    }
}

#[async_trait]
impl AgentsApi for MockAgentsApi {
    async fn get_connection(&self, name: &str) -> Result<Connection> {
        self.record("get_connection");
        if !self.connection_exists {
            return Err(Error::ConnectionNotFound(name.to_string()));
        }
        Ok(Connection {
            id: format!("/connections/{}", name),
            name: name.to_string(),
            connection_type: Some("SharepointGrounding".to_string()),
            target: None,
            is_default: false,
        })
    }

    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        self.record("create_agent");
        Ok(Agent {
            id: "asst_1".to_string(),
            name: Some(request.name.clone()),
            model: request.model.clone(),
            instructions: Some(request.instructions.clone()),
            tools: request.tools.clone(),
            created_at: 0,
        })
    }

    async fn delete_agent(&self, _agent_id: &str) -> Result<()> {
        self.record("delete_agent");
        Ok(())
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.record("create_thread");
        let mut threads = self.threads.lock().unwrap();
        *threads += 1;
        Ok(Thread {
            id: format!("thread_{}", *threads),
            created_at: 0,
        })
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        self.record("create_message");
        Ok(Self::message("msg_user", thread_id, role, content, None))
    }

    async fn create_run(&self, thread_id: &str, _agent_id: &str) -> Result<Run> {
        self.record("create_run");
        let mut runs = self.runs.lock().unwrap();
        *runs += 1;
        Ok(self.run(&format!("run_{}", *runs), thread_id, RunStatus::Queued))
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.record("get_run");
        Ok(self.run(run_id, thread_id, self.next_status()))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        self.record("list_messages");
        let mut messages = Vec::new();
        let latest_run = *self.runs.lock().unwrap();
        let reply_run = if self.stale_reply {
            latest_run.saturating_sub(1)
        } else {
            latest_run
        };
        if let Some(reply) = &self.reply {
            messages.push(Self::message(
                "msg_assistant",
                thread_id,
                MessageRole::Assistant,
                reply,
                Some(format!("run_{}", reply_run)),
            ));
        }
        messages.push(Self::message(
            "msg_user",
            thread_id,
            MessageRole::User,
            "question",
            None,
        ));
        Ok(messages)
    }
}
