//! Interactive chat loop
//!
//! Lines are read from any async line source and answered through a
//! [`Responder`]. All questions in one session share a single thread, so the
//! agent sees the earlier exchanges.

use std::io::Write;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::agent::{AgentResponse, Responder};
use crate::conversation::ConversationHistory;
use crate::error::Result;

pub const HELP_TEXT: &str = "\
Available commands:
  /help, /h       Show this help message
  /history, /hi   Show conversation history
  /clear, /c      Clear conversation history
  /quit, /q       Exit (also: quit, exit)

Anything else is sent to the agent as a question about your SharePoint content.";

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    Empty,
    Quit,
    Help,
    History,
    Clear,
    Query(&'a str),
}

impl<'a> ChatCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Self::Empty,
            "/quit" | "/q" | "quit" | "exit" => Self::Quit,
            "/help" | "/h" => Self::Help,
            "/history" | "/hi" => Self::History,
            "/clear" | "/c" => Self::Clear,
            _ => Self::Query(line),
        }
    }
}

/// How a session went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub queries: usize,
    pub failures: usize,
    /// Thread the session used, if any question was answered
    pub thread_id: Option<String>,
}

/// One interactive session
pub struct ChatSession {
    id: Uuid,
    thread_id: Option<String>,
    history: ConversationHistory,
    queries: usize,
    failures: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            thread_id: None,
            history: ConversationHistory::new(),
            queries: 0,
            failures: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read and answer lines until a quit command or end of input.
    ///
    /// Failed questions are reported and the loop continues; errors that
    /// invalidate the whole session (credentials, missing connection) end it.
    pub async fn run<R, I, W>(&mut self, responder: &mut R, input: I, out: &mut W) -> Result<ChatSummary>
    where
        R: Responder + ?Sized,
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let span = info_span!("chat", session = %self.id);
        self.run_inner(responder, input, out).instrument(span).await
    }

    async fn run_inner<R, I, W>(&mut self, responder: &mut R, input: I, out: &mut W) -> Result<ChatSummary>
    where
        R: Responder + ?Sized,
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Interactive session started");
        writeln!(out, "SharePoint Agent - Interactive Chat")?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Ask me anything about your SharePoint content.")?;
        writeln!(out, "Type '/help' for available commands or '/quit' to exit.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "\nYou: ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match ChatCommand::parse(&line) {
                ChatCommand::Empty => continue,
                ChatCommand::Quit => break,
                ChatCommand::Help => writeln!(out, "\n{}", HELP_TEXT)?,
                ChatCommand::History => self.print_history(out)?,
                ChatCommand::Clear => {
                    self.history.clear();
                    writeln!(out, "\nConversation history cleared.")?;
                }
                ChatCommand::Query(question) => self.ask(responder, question, out).await?,
            }
        }

        writeln!(out, "\nGoodbye!")?;
        info!(
            "Interactive session ended after {} queries ({} failed)",
            self.queries, self.failures
        );

        Ok(ChatSummary {
            queries: self.queries,
            failures: self.failures,
            thread_id: self.thread_id.clone(),
        })
    }

    async fn ask<R, W>(&mut self, responder: &mut R, question: &str, out: &mut W) -> Result<()>
    where
        R: Responder + ?Sized,
        W: Write,
    {
        self.queries += 1;
        writeln!(out, "Processing your query...")?;

        let started = Instant::now();
        match responder.respond(question, self.thread_id.as_deref()).await {
            Ok(response) => {
                if self.thread_id.is_none() {
                    self.thread_id = Some(response.thread_id.clone());
                }
                self.history.record_success(question, &response);
                print_response(out, &response)?;
            }
            Err(e) if e.is_fatal() => {
                error!("Session cannot continue: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Query failed: {}", e);
                self.failures += 1;
                self.history
                    .record_failure(question, &e.to_string(), started.elapsed());
                writeln!(out, "\nError: {}", e)?;
            }
        }
        Ok(())
    }

    fn print_history<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.history.is_empty() {
            writeln!(out, "\nNo conversation history yet.")?;
            return Ok(());
        }

        writeln!(out, "\nConversation History ({} items):", self.history.len())?;
        writeln!(out, "{}", "=".repeat(60))?;
        for (i, entry) in self.history.entries().iter().enumerate() {
            let status = if entry.success { "ok" } else { "failed" };
            writeln!(out, "\n{}. [{}] Query: {}", i + 1, status, entry.query_preview())?;
            writeln!(out, "   Response: {}", entry.response_preview())?;
            writeln!(out, "   Time: {:.2}s", entry.elapsed.as_secs_f64())?;
        }
        Ok(())
    }
}

fn print_response<W: Write>(out: &mut W, response: &AgentResponse) -> Result<()> {
    writeln!(out, "\nAssistant: {}", response.content)?;
    for citation in &response.citations {
        match &citation.title {
            Some(title) => writeln!(out, "  - {} ({})", title, citation.url)?,
            None => writeln!(out, "  - {}", citation.url)?,
        }
    }
    writeln!(out, "Response time: {:.2}s", response.elapsed.as_secs_f64())?;
    Ok(())
}
