use crate::error::{Result, TubelensError};

/// AI backend used for comment insights. All three speak the
/// OpenAI-compatible chat completions dialect.
#[derive(Clone, Debug, Default)]
pub enum Provider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

impl Provider {
    pub fn api_url(&self) -> &'static str {
        match self {
            Provider::Grok => "https://api.x.ai/v1/chat/completions",
            Provider::Openai => "https://api.openai.com/v1/chat/completions",
            Provider::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Provider::Grok => "grok-4-fast",
            Provider::Openai => "gpt-5.1",
            Provider::Gemini => "gemini-3-pro",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Grok => "XAI_API_KEY",
            Provider::Openai => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Grok => "Grok",
            Provider::Openai => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Lower-case tag used in cache file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Provider::Grok => "grok",
            Provider::Openai => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Read this provider's API key from the environment.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(self.env_var()).map_err(|_| TubelensError::MissingApiKey {
            env_var: self.env_var().to_string(),
        })
    }
}
