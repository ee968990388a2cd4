// libs/agent-cell/src/services/session.rs
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use conversation_cell::services::conversation::DEFAULT_CONTEXT_MESSAGES;
use conversation_cell::{ConversationStore, Role};
use registry_cell::Registry;
use shared_utils::text::ellipsize;

use crate::error::AgentError;
use crate::services::agent::ClinicalAgent;

static SESSION_PATIENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT\d{6}").expect("valid patient id regex"));

const HISTORY_PREVIEW_CHARS: usize = 200;

pub const MISSING_PATIENT_REPLY: &str =
    "Please specify a patient ID (e.g., 'PT000001') in your message.";

pub const HELP_TEXT: &str = "\
Commands:
   /list               - Show all patients with conversation history
   /history PT000001   - Show patient history
   /clear PT000001     - Clear patient history
   /help               - Show this help
   /quit               - Exit

Try these:
   'Find patient PT000001'
   'PT000001 what is my medical history'
   'Is there a drug interaction between warfarin and aspirin?'

The first message must name a patient (PT######).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Quit,
    Help,
    List,
    History(Option<String>),
    Clear(Option<String>),
    Message(String),
    Empty,
}

impl ChatCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return ChatCommand::Empty;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next().map(str::to_string);

        match command.as_str() {
            "/quit" => ChatCommand::Quit,
            "/help" => ChatCommand::Help,
            "/list" => ChatCommand::List,
            "/history" => ChatCommand::History(argument),
            "/clear" => ChatCommand::Clear(argument),
            _ => ChatCommand::Message(input.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    Text(String),
    Quit,
    Nothing,
}

/// One interactive chat: the registry it owns, the transcripts on disk and
/// the patient the conversation is currently about.
pub struct ChatSession {
    agent: ClinicalAgent,
    registry: Registry,
    store: ConversationStore,
    current_patient: Option<String>,
}

impl ChatSession {
    pub fn new(agent: ClinicalAgent, registry: Registry, store: ConversationStore) -> Self {
        Self {
            agent,
            registry,
            store,
            current_patient: None,
        }
    }

    pub fn current_patient(&self) -> Option<&str> {
        self.current_patient.as_deref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub async fn handle_line(&mut self, line: &str) -> SessionReply {
        match ChatCommand::parse(line) {
            ChatCommand::Empty => SessionReply::Nothing,
            ChatCommand::Quit => SessionReply::Quit,
            ChatCommand::Help => SessionReply::Text(HELP_TEXT.to_string()),
            ChatCommand::List => SessionReply::Text(render(self.list_patients())),
            ChatCommand::History(Some(patient_id)) => {
                SessionReply::Text(render(self.show_history(&patient_id)))
            }
            ChatCommand::Clear(Some(patient_id)) => {
                SessionReply::Text(render(self.clear_history(&patient_id)))
            }
            ChatCommand::History(None) => SessionReply::Text("Usage: /history PT000001".to_string()),
            ChatCommand::Clear(None) => SessionReply::Text("Usage: /clear PT000001".to_string()),
            ChatCommand::Message(text) => SessionReply::Text(render(self.process_message(&text).await)),
        }
    }

    /// Routes a free-text message for the detected or current patient and
    /// records both sides of the exchange.
    pub async fn process_message(&mut self, text: &str) -> Result<String, AgentError> {
        if let Some(found) = SESSION_PATIENT_REGEX.find(text) {
            self.switch_patient(found.as_str())?;
        }

        let Some(patient_id) = self.current_patient.clone() else {
            return Ok(MISSING_PATIENT_REPLY.to_string());
        };

        self.store.append(&patient_id, Role::Human, text)?;
        let context = self.store.context_window(&patient_id, DEFAULT_CONTEXT_MESSAGES)?;

        let reply = self.agent.respond(text, &mut self.registry, &context).await?;
        self.store.append(&patient_id, Role::Ai, &reply.output)?;

        Ok(reply.output)
    }

    fn switch_patient(&mut self, patient_id: &str) -> Result<(), AgentError> {
        if self.current_patient.as_deref() != Some(patient_id) {
            let previous = self.store.read(patient_id)?.len();
            info!(patient_id, previous_messages = previous, "Switched current patient");
            self.current_patient = Some(patient_id.to_string());
        }
        Ok(())
    }

    fn list_patients(&self) -> Result<String, AgentError> {
        let patients = self.store.list_patients()?;

        let mut out = format!("Patients with Conversation History ({})", patients.len());
        if patients.is_empty() {
            out.push_str("\nNo patients yet.");
            return Ok(out);
        }

        for patient_id in &patients {
            let summary = self.store.summary(patient_id)?;
            let marker = if self.current_patient.as_deref() == Some(patient_id) {
                " (current)"
            } else {
                ""
            };
            let last = summary
                .last_updated
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "never".to_string());

            let _ = write!(
                out,
                "\n\n{}{}\n   Messages: {} ({} questions, {} responses)\n   Last: {}",
                patient_id,
                marker,
                summary.total_messages,
                summary.human_messages,
                summary.ai_messages,
                last
            );
        }
        Ok(out)
    }

    fn show_history(&self, patient_id: &str) -> Result<String, AgentError> {
        let history = self.store.read(patient_id)?;

        let mut out = format!("Conversation History for {}", patient_id);
        if history.is_empty() {
            out.push_str("\nNo history found.");
            return Ok(out);
        }

        for message in &history {
            let speaker = match message.role {
                Role::Human => "You",
                Role::Ai => "Agent",
            };
            let _ = write!(
                out,
                "\n\n{} [{}]:\n   {}",
                speaker,
                message.timestamp.format("%Y-%m-%d"),
                ellipsize(&message.content, HISTORY_PREVIEW_CHARS)
            );
        }
        Ok(out)
    }

    fn clear_history(&self, patient_id: &str) -> Result<String, AgentError> {
        self.store.clear(patient_id)?;
        Ok(format!("Cleared history for {}", patient_id))
    }
}

fn render(result: Result<String, AgentError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            warn!("Chat turn failed: {}", err);
            format!("Error: {}", err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(ChatCommand::parse("/QUIT"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("  /help "), ChatCommand::Help);
        assert_eq!(ChatCommand::parse("/list"), ChatCommand::List);
        assert_eq!(
            ChatCommand::parse("/history PT000001"),
            ChatCommand::History(Some("PT000001".to_string()))
        );
        assert_eq!(ChatCommand::parse("/clear"), ChatCommand::Clear(None));
        assert_eq!(ChatCommand::parse("   "), ChatCommand::Empty);
    }

    #[test]
    fn anything_else_is_a_message() {
        assert_eq!(
            ChatCommand::parse("PT000001 how am I?"),
            ChatCommand::Message("PT000001 how am I?".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/unknown thing"),
            ChatCommand::Message("/unknown thing".to_string())
        );
    }
}
