use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub mod ollama;
pub mod openai;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// One structured-generation request: a prompt pair plus the JSON Schema
/// the service output must conform to. The cancellation token is honored
/// cooperatively at the network-call boundary.
pub struct StructuredRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub schema_name: &'a str,
    pub schema: &'a Value,
    pub cancel: CancellationToken,
}

/// Trait for generative-service implementations. Providers return the
/// raw JSON value; parsing against the contract happens in the schema
/// module so every provider is validated the same way.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// Issues one schema-constrained generation request and returns the
    /// parsed JSON body of the service's answer.
    async fn generate_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Value, GenerationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    OpenAi,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: Option<String>, // Not needed for local Ollama, kept for consistency
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            model: "gpt-4o".to_string(),
            api_key: None,
            base_url: None,
            temperature: 0.3,
            max_tokens: Some(4096),
        }
    }
}
