use crate::ai::providers::{GenerativeProvider, StructuredRequest};
use crate::ai::prompts::PromptBuilder;
use crate::error::GenerationError;
use crate::quiz::QuizMetadata;
use crate::schema;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Issues the single quiz-level metadata request. No retry: a failed or
/// non-conforming response propagates as-is to the orchestrator.
pub struct MetadataGenerator {
    provider: Arc<dyn GenerativeProvider>,
    prompts: PromptBuilder,
}

impl MetadataGenerator {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            prompts: PromptBuilder::new(),
        }
    }

    pub async fn generate(
        &self,
        passage: &str,
        cancel: &CancellationToken,
    ) -> Result<QuizMetadata, GenerationError> {
        if passage.trim().is_empty() {
            return Err(GenerationError::EmptyArticle);
        }

        log::debug!(
            "Requesting quiz metadata from {} ({})",
            self.provider.name(),
            self.provider.model()
        );

        let pair = self.prompts.build_metadata_prompt(passage);
        let schema = schema::metadata_schema();
        let value = self
            .provider
            .generate_structured(StructuredRequest {
                system_prompt: &pair.system,
                user_prompt: &pair.user,
                schema_name: "quiz_metadata",
                schema: &schema,
                cancel: cancel.clone(),
            })
            .await?;

        schema::parse_metadata(value)
    }
}
