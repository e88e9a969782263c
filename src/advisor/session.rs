//! Advisory chat session state machine.
//!
//! One session per run, independent of the shared store. The transcript is
//! append-only and strictly ordered by submission time; no reordering, no
//! dedup. At most one outbound request is in flight, and submissions
//! arriving while a request is pending are dropped, not queued.

use super::client::AdvisorProvider;
use super::prompts;
use crate::error::AdvisorError;
use crate::types::ChatMessage;

/// Where the session sits between submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// A request is in flight; new submissions are rejected.
    Awaiting,
    /// The last turn resolved through the failure path. Behaves exactly
    /// like `Idle` for new input; tracked separately for observability.
    IdleWithError,
}

impl SessionPhase {
    pub fn accepts_input(&self) -> bool {
        !matches!(self, SessionPhase::Awaiting)
    }
}

/// Result of the synchronous half of a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The user turn was appended. Send these turns to the endpoint and
    /// feed the result back through `resolve`.
    Dispatched(Vec<ChatMessage>),
    /// Empty or whitespace-only input; nothing changed.
    Ignored,
    /// A request is already in flight; the submission was dropped and the
    /// caller must retry after the current turn resolves.
    Busy,
}

/// Result of a fully driven `submit`.
#[derive(Debug)]
pub enum SubmitResult {
    /// The exchange completed; this is the appended assistant turn.
    Replied(ChatMessage),
    Ignored,
    Busy,
}

pub struct AdvisorSession {
    transcript: Vec<ChatMessage>,
    pending_input: String,
    phase: SessionPhase,
}

impl AdvisorSession {
    /// Open a session with the standard greeting already on the transcript.
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(prompts::GREETING)],
            pending_input: String::new(),
            phase: SessionPhase::Idle,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the pending input buffer, e.g. from a suggested prompt.
    /// Does not submit.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Synchronous half of a submission: validate the buffer, append the
    /// user turn, clear the buffer, and enter `Awaiting`.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.phase == SessionPhase::Awaiting {
            log::warn!("Advisory submission dropped: a request is already in flight");
            return SubmitOutcome::Busy;
        }

        let text = self.pending_input.trim().to_string();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.transcript.push(ChatMessage::user(text));
        self.pending_input.clear();
        self.phase = SessionPhase::Awaiting;

        SubmitOutcome::Dispatched(self.transcript.clone())
    }

    /// Apply the outcome of the outbound call and return to an idle phase.
    ///
    /// Every resolved submission appends exactly one assistant turn: the
    /// reply text, the could-not-process fallback when the endpoint
    /// answered empty, or the apology when the call failed. The session
    /// never stays stuck in `Awaiting`.
    pub fn resolve(&mut self, outcome: Result<String, AdvisorError>) -> ChatMessage {
        let (content, phase) = match outcome {
            Ok(text) if !text.trim().is_empty() => (text, SessionPhase::Idle),
            Ok(_) => {
                log::info!("Advisory reply contained no text; using the generic fallback");
                (prompts::EMPTY_REPLY_FALLBACK.to_string(), SessionPhase::Idle)
            }
            Err(err) => {
                log::warn!(
                    "Advisory call failed ({}): {}",
                    if err.is_retryable() { "retryable" } else { "non-retryable" },
                    err
                );
                (
                    prompts::FAILURE_FALLBACK.to_string(),
                    SessionPhase::IdleWithError,
                )
            }
        };

        let reply = ChatMessage::assistant(content);
        self.transcript.push(reply.clone());
        self.phase = phase;
        reply
    }

    /// Submit `text` through `provider`, driving the full begin/resolve
    /// cycle around one outbound call.
    pub async fn submit(
        &mut self,
        text: impl Into<String>,
        provider: &dyn AdvisorProvider,
    ) -> SubmitResult {
        if self.phase == SessionPhase::Awaiting {
            log::warn!("Advisory submission dropped: a request is already in flight");
            return SubmitResult::Busy;
        }

        self.set_input(text);
        match self.begin_submit() {
            SubmitOutcome::Ignored => SubmitResult::Ignored,
            SubmitOutcome::Busy => SubmitResult::Busy,
            SubmitOutcome::Dispatched(turns) => {
                let outcome = provider.generate(&turns).await;
                SubmitResult::Replied(self.resolve(outcome))
            }
        }
    }
}

impl Default for AdvisorSession {
    fn default() -> Self {
        Self::new()
    }
}
