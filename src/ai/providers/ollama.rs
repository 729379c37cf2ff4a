use super::{GenerativeProvider, ProviderConfig, StructuredRequest};
use crate::error::GenerationError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Local Ollama backend. Schema-constrained decoding goes through the
/// `format` field of `/api/chat`, so no API key is involved.
pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;
        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/api".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl GenerativeProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Value, GenerationError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt }
            ],
            "stream": false,
            "format": request.schema,
            "options": { "temperature": self.temperature }
        });

        let request_builder = self.client
            .post(format!("{}/chat", self.base_url))
            .json(&body);

        let response = tokio::select! {
            _ = request.cancel.cancelled() => return Err(GenerationError::Cancelled),
            result = request_builder.send() => result?,
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("Ollama request failed with status {}: {}", status, text);
            return Err(GenerationError::service(format!(
                "Ollama API error {}: {}",
                status, text
            )));
        }

        let json_response: Value = response.json().await?;
        let content = json_response["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::service("Ollama response carried no message content")
            })?;

        log::debug!("Ollama structured response for {}: {}", request.schema_name, content);
        Ok(serde_json::from_str(content)?)
    }
}
