use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde_json::json;

use shared_config::AppConfig;

pub struct TestConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub conversation_dir: PathBuf,
    pub action_log_dir: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            openai_api_key: "test-openai-key".to_string(),
            openai_base_url: "http://localhost:54321/v1".to_string(),
            conversation_dir: PathBuf::from("target/test-conversations"),
            action_log_dir: PathBuf::from("target/test-actions"),
        }
    }
}

impl TestConfig {
    /// Points both stores under `root` and the completion client at `base_url`.
    pub fn with_paths(root: &Path, base_url: &str) -> Self {
        Self {
            openai_base_url: base_url.to_string(),
            conversation_dir: root.join("conversations"),
            action_log_dir: root.join("actions"),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            openai_api_key: self.openai_api_key.clone(),
            openai_base_url: self.openai_base_url.clone(),
            conversation_dir: self.conversation_dir.clone(),
            action_log_dir: self.action_log_dir.clone(),
            ..AppConfig::default()
        }
    }
}

/// Fixed "now" used by scheduling tests: Wednesday 2030-01-02 08:00.
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, 2)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid test timestamp")
}

/// First date strictly after `from` that falls on `weekday`.
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

pub struct MockOpenAiResponses;

impl MockOpenAiResponses {
    pub fn chat_completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "type": "invalid_request_error"
            }
        })
    }
}
