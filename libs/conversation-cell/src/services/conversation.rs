// libs/conversation-cell/src/services/conversation.rs
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use shared_utils::text::truncate_chars;

use crate::error::ConversationError;
use crate::models::{ConversationMessage, ConversationSummary, Role};
use crate::services::storage;

const HISTORY_SUFFIX: &str = "_history.json";

/// Default number of trailing messages replayed as prompt context.
pub const DEFAULT_CONTEXT_MESSAGES: usize = 5;

/// Characters of each message kept in the context window.
pub const CONTEXT_CONTENT_CHARS: usize = 100;

/// Conversation transcripts, one pretty-printed JSON file per patient under
/// `dir`.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    dir: PathBuf,
}

impl ConversationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn history_path(&self, patient_id: &str) -> Result<PathBuf, ConversationError> {
        storage::keyed_path(&self.dir, patient_id, HISTORY_SUFFIX)
    }

    /// Appends one message, timestamped now.
    pub fn append(
        &self,
        patient_id: &str,
        role: Role,
        content: &str,
    ) -> Result<ConversationMessage, ConversationError> {
        let path = self.history_path(patient_id)?;
        let mut history: Vec<ConversationMessage> = storage::read_array(&path)?;

        let message = ConversationMessage {
            role,
            content: content.to_string(),
            timestamp: Local::now().naive_local(),
        };
        history.push(message.clone());
        storage::write_array(&path, &history)?;

        debug!(patient_id, %role, total = history.len(), "Appended conversation message");
        Ok(message)
    }

    /// Full transcript, oldest first.
    pub fn read(&self, patient_id: &str) -> Result<Vec<ConversationMessage>, ConversationError> {
        storage::read_array(&self.history_path(patient_id)?)
    }

    /// Last `n` messages as `Patient: …` / `Assistant: …` lines, each cut to
    /// [`CONTEXT_CONTENT_CHARS`] characters. Empty when there is no history.
    pub fn context_window(&self, patient_id: &str, n: usize) -> Result<String, ConversationError> {
        let history = self.read(patient_id)?;
        let start = history.len().saturating_sub(n);

        let lines: Vec<String> = history[start..]
            .iter()
            .map(|m| {
                format!(
                    "{}: {}",
                    m.role.speaker(),
                    truncate_chars(&m.content, CONTEXT_CONTENT_CHARS)
                )
            })
            .collect();

        Ok(lines.join("\n"))
    }

    /// Patients that have a transcript on disk, sorted.
    pub fn list_patients(&self) -> Result<Vec<String>, ConversationError> {
        storage::list_keys(&self.dir, HISTORY_SUFFIX)
    }

    /// Removes the transcript. Clearing a patient without history is a no-op.
    pub fn clear(&self, patient_id: &str) -> Result<(), ConversationError> {
        match fs::remove_file(self.history_path(patient_id)?) {
            Ok(()) => {
                info!(patient_id, "Cleared conversation history");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn summary(&self, patient_id: &str) -> Result<ConversationSummary, ConversationError> {
        let history = self.read(patient_id)?;
        let count = |role: Role| history.iter().filter(|m| m.role == role).count();

        Ok(ConversationSummary {
            patient_id: patient_id.to_string(),
            total_messages: history.len(),
            human_messages: count(Role::Human),
            ai_messages: count(Role::Ai),
            last_updated: history.last().map(|m| m.timestamp),
        })
    }
}
