use crate::error::{Result, SeoError};

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The language-model execution target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Cloud-hosted OpenAI-compatible chat model
    #[default]
    Remote,
    /// Locally hosted Ollama model
    Local,
}

/// A resolved, callable backend: endpoint, credentials and model identifier.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub kind: Backend,
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Remote => "OpenAI",
            Backend::Local => "Ollama",
        }
    }

    /// Transcript budget for the context block. Local models are assumed to
    /// have smaller effective context windows.
    pub fn max_transcript_chars(&self) -> usize {
        match self {
            Backend::Remote => 30_000,
            Backend::Local => 15_000,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::Remote => "gpt-4o",
            Backend::Local => "llama3.1",
        }
    }

    /// Resolve a callable backend for a model identifier. A missing API key
    /// resolves to `BackendUnavailable`, which the engine treats the same as
    /// any other generation failure.
    pub fn resolve(&self, model: &str) -> Result<BackendConfig> {
        match self {
            Backend::Remote => {
                let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                    SeoError::BackendUnavailable {
                        backend: self.name().to_string(),
                        reason: "OPENAI_API_KEY environment variable is not set".to_string(),
                    }
                })?;
                Ok(BackendConfig {
                    kind: *self,
                    api_url: OPENAI_CHAT_URL.to_string(),
                    api_key: Some(key),
                    model: model.to_string(),
                })
            }
            Backend::Local => {
                let base = std::env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
                Ok(BackendConfig {
                    kind: *self,
                    api_url: format!("{}/api/chat", base.trim_end_matches('/')),
                    api_key: None,
                    model: model.to_string(),
                })
            }
        }
    }
}
