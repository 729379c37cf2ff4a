pub mod prompts;
pub mod providers;

pub use prompts::{PromptBuilder, PromptPair};
pub use providers::{
    GenerativeProvider, OllamaProvider, OpenAiProvider, ProviderConfig, ProviderKind,
    StructuredRequest,
};

use crate::error::GenerationError;

/// Constructs the provider named by the config.
pub fn build_provider(
    config: &ProviderConfig,
) -> Result<Box<dyn GenerativeProvider>, GenerationError> {
    match config.kind {
        ProviderKind::OpenAi => Ok(Box::new(OpenAiProvider::new(config)?)),
        ProviderKind::Ollama => Ok(Box::new(OllamaProvider::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_requires_api_key() {
        let config = ProviderConfig::default();
        assert!(config.api_key.is_none());
        assert!(build_provider(&config).is_err());

        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "OpenAI");
    }

    #[test]
    fn test_ollama_needs_no_api_key() {
        let config = ProviderConfig {
            kind: ProviderKind::Ollama,
            model: "llama3.2".to_string(),
            ..ProviderConfig::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "Ollama");
        assert_eq!(provider.model(), "llama3.2");
    }
}
