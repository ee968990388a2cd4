use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_CONVERSATION_DIR: &str = ".patient_conversations";
pub const DEFAULT_ACTION_LOG_DIR: &str = ".agent_actions";
pub const DEFAULT_API_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_temperature: f32,
    pub conversation_dir: PathBuf,
    pub action_log_dir: PathBuf,
    pub api_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENAI_API_KEY not set, text generation fallback disabled");
                    String::new()
                }),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_temperature: parse_or_default("OPENAI_TEMPERATURE", DEFAULT_OPENAI_TEMPERATURE),
            conversation_dir: env::var("CONVERSATION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONVERSATION_DIR)),
            action_log_dir: env::var("ACTION_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ACTION_LOG_DIR)),
            api_port: parse_or_default("API_PORT", DEFAULT_API_PORT),
        };

        if !config.is_llm_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_llm_configured(&self) -> bool {
        !self.openai_api_key.is_empty()
            && !self.openai_model.is_empty()
            && !self.openai_base_url.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_temperature: DEFAULT_OPENAI_TEMPERATURE,
            conversation_dir: PathBuf::from(DEFAULT_CONVERSATION_DIR),
            action_log_dir: PathBuf::from(DEFAULT_ACTION_LOG_DIR),
            api_port: DEFAULT_API_PORT,
        }
    }
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
