use super::{GenerativeProvider, ProviderConfig, StructuredRequest};
use crate::error::GenerationError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| GenerationError::service("OpenAI API key not provided"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GenerativeProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Value, GenerationError> {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt }
            ],
            "temperature": self.temperature,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema
                }
            }
        });
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        let request_builder = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response = tokio::select! {
            _ = request.cancel.cancelled() => return Err(GenerationError::Cancelled),
            result = request_builder.send() => result?,
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("OpenAI request failed with status {}: {}", status, text);
            return Err(GenerationError::service(format!(
                "OpenAI API error {}: {}",
                status, text
            )));
        }

        let json_response: Value = response.json().await?;
        let content = json_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::service("OpenAI response carried no message content")
            })?;

        log::debug!("OpenAI structured response for {}: {}", request.schema_name, content);
        Ok(serde_json::from_str(content)?)
    }
}
