use crate::ai::providers::{GenerativeProvider, StructuredRequest};
use crate::ai::prompts::PromptBuilder;
use crate::error::GenerationError;
use crate::quiz::{insertion_markers_valid, Question, QuestionType};
use crate::schema;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Issues one structured request per (number, type) pair and validates
/// the result against the type's constraints. The caller's number and
/// type are authoritative; whatever the service echoes back is
/// overwritten before validation.
pub struct QuestionGenerator {
    provider: Arc<dyn GenerativeProvider>,
    prompts: PromptBuilder,
}

impl QuestionGenerator {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            prompts: PromptBuilder::new(),
        }
    }

    pub async fn generate(
        &self,
        passage: &str,
        number: u32,
        qtype: QuestionType,
        cancel: &CancellationToken,
    ) -> Result<Question, GenerationError> {
        if passage.trim().is_empty() {
            return Err(GenerationError::EmptyArticle);
        }

        log::debug!(
            "Requesting question {} ({}) from {} ({})",
            number,
            qtype,
            self.provider.name(),
            self.provider.model()
        );

        let pair = self.prompts.build_question_prompt(passage, number, qtype);
        let schema = schema::question_schema();
        let value = self
            .provider
            .generate_structured(StructuredRequest {
                system_prompt: &pair.system,
                user_prompt: &pair.user,
                schema_name: "quiz_question",
                schema: &schema,
                cancel: cancel.clone(),
            })
            .await
            .map_err(|e| contextualize(number, qtype, e))?;

        let question = schema::parse_question(value).map_err(|e| contextualize(number, qtype, e))?;
        normalize(question, number, qtype).map_err(|e| contextualize(number, qtype, e))
    }
}

/// Forces the requested number and type onto the question, then
/// re-checks the per-type constraints the service was instructed to
/// honor. Violations fail the question rather than being repaired.
fn normalize(
    mut question: Question,
    number: u32,
    qtype: QuestionType,
) -> Result<Question, GenerationError> {
    question.question_number = number;
    question.question_type = qtype;

    if qtype != QuestionType::InsertText {
        // Present iff InsertText.
        question.paragraph_for_insertion = None;
        question.sentence_to_insert = None;
    }

    let correct_count = question.choices.iter().filter(|c| c.is_correct).count();
    match qtype {
        QuestionType::ProseSummary => {
            if question.choices.len() != 6 {
                return Err(GenerationError::service(format!(
                    "prose summary must have 6 choices, got {}",
                    question.choices.len()
                )));
            }
            if correct_count != 3 {
                return Err(GenerationError::service(format!(
                    "prose summary must have exactly 3 correct choices, got {}",
                    correct_count
                )));
            }
        }
        QuestionType::InsertText => {
            let paragraph = question
                .paragraph_for_insertion
                .as_deref()
                .ok_or_else(|| GenerationError::service("insert text is missing paragraphForInsertion"))?;
            if !insertion_markers_valid(paragraph) {
                return Err(GenerationError::service(
                    "paragraphForInsertion must carry the markers [A]..[D] exactly once each, in order",
                ));
            }
            match question.sentence_to_insert.as_deref() {
                Some(s) if !s.trim().is_empty() => {}
                _ => {
                    return Err(GenerationError::service(
                        "insert text is missing sentenceToInsert",
                    ))
                }
            }
            if question.choices.len() != 4 {
                return Err(GenerationError::service(format!(
                    "insert text must have 4 marker choices, got {}",
                    question.choices.len()
                )));
            }
            if correct_count != 1 {
                return Err(GenerationError::service(format!(
                    "insert text must have exactly 1 correct marker, got {}",
                    correct_count
                )));
            }
        }
        _ => {
            if question.choices.len() < 2 {
                return Err(GenerationError::service(format!(
                    "question must have at least 2 choices, got {}",
                    question.choices.len()
                )));
            }
            if correct_count != 1 {
                return Err(GenerationError::service(format!(
                    "question must have exactly 1 correct choice, got {}",
                    correct_count
                )));
            }
        }
    }

    Ok(question)
}

/// Wraps a failure with the question number and type for diagnosis.
/// Cancellation passes through untouched so a cancelled run does not
/// read as twelve distinct failures.
fn contextualize(number: u32, qtype: QuestionType, err: GenerationError) -> GenerationError {
    match err {
        GenerationError::Cancelled => GenerationError::Cancelled,
        other => GenerationError::Question {
            number,
            qtype,
            source: Box::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct CannedProvider {
        response: Value,
    }

    #[async_trait]
    impl GenerativeProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "test"
        }

        async fn generate_structured(
            &self,
            request: StructuredRequest<'_>,
        ) -> Result<Value, GenerationError> {
            if request.cancel.is_cancelled() {
                return Err(GenerationError::Cancelled);
            }
            Ok(self.response.clone())
        }
    }

    fn factual_response(echoed_number: u32) -> Value {
        json!({
            "questionNumber": echoed_number,
            "questionType": "FactualInfo",
            "questionText": "According to the passage, what happened?",
            "choices": [
                {"text": "a", "isCorrect": false},
                {"text": "b", "isCorrect": true},
                {"text": "c", "isCorrect": false},
                {"text": "d", "isCorrect": false}
            ],
            "hint": "Reread paragraph 2.",
            "rationale": "Stated directly.",
            "relevantArticleSnippet": "…it happened…",
            "highlightedText": null,
            "paragraphForInsertion": null,
            "sentenceToInsert": null
        })
    }

    #[tokio::test]
    async fn test_requested_number_is_authoritative() {
        // Service echoes 99; the caller asked for 4.
        let generator = QuestionGenerator::new(Arc::new(CannedProvider {
            response: factual_response(99),
        }));
        let question = generator
            .generate("A passage.", 4, QuestionType::FactualInfo, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(question.question_number, 4);
        assert_eq!(question.question_type, QuestionType::FactualInfo);
    }

    #[tokio::test]
    async fn test_wrong_correct_count_fails_with_context() {
        let mut response = factual_response(5);
        response["choices"][0]["isCorrect"] = json!(true); // two correct now
        let generator = QuestionGenerator::new(Arc::new(CannedProvider { response }));
        let err = generator
            .generate("A passage.", 5, QuestionType::FactualInfo, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            GenerationError::Question { number, qtype, .. } => {
                assert_eq!(number, 5);
                assert_eq!(qtype, QuestionType::FactualInfo);
            }
            other => panic!("expected question context, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_text_validation() {
        let response = json!({
            "questionNumber": 9,
            "questionType": "InsertText",
            "questionText": "Where does the sentence best fit?",
            "choices": [
                {"text": "[A]", "isCorrect": false},
                {"text": "[B]", "isCorrect": true},
                {"text": "[C]", "isCorrect": false},
                {"text": "[D]", "isCorrect": false}
            ],
            "hint": "Look at the pronoun reference.",
            "rationale": "The pronoun points back to the second sentence.",
            "relevantArticleSnippet": "…the paragraph…",
            "highlightedText": null,
            "paragraphForInsertion": "One. [A] Two. [B] Three. [C] Four. [D]",
            "sentenceToInsert": "This, however, was not always the case."
        });
        let generator = QuestionGenerator::new(Arc::new(CannedProvider { response }));
        let question = generator
            .generate("A passage.", 9, QuestionType::InsertText, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(question.choices.len(), 4);
        assert!(question.sentence_to_insert.is_some());
    }

    #[tokio::test]
    async fn test_insert_text_bad_markers_fail() {
        let response = json!({
            "questionNumber": 9,
            "questionType": "InsertText",
            "questionText": "Where does the sentence best fit?",
            "choices": [
                {"text": "[A]", "isCorrect": true},
                {"text": "[B]", "isCorrect": false},
                {"text": "[C]", "isCorrect": false},
                {"text": "[D]", "isCorrect": false}
            ],
            "hint": "h",
            "rationale": "r",
            "relevantArticleSnippet": "s",
            "highlightedText": null,
            "paragraphForInsertion": "One. [A] Two. [B] Three. [C]",
            "sentenceToInsert": "A sentence."
        });
        let generator = QuestionGenerator::new(Arc::new(CannedProvider { response }));
        let err = generator
            .generate("A passage.", 9, QuestionType::InsertText, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Question { number: 9, .. }));
    }

    #[tokio::test]
    async fn test_insertion_fields_cleared_for_other_types() {
        let mut response = factual_response(1);
        response["paragraphForInsertion"] = json!("stray [A] [B] [C] [D]");
        response["sentenceToInsert"] = json!("stray");
        let generator = QuestionGenerator::new(Arc::new(CannedProvider { response }));
        let question = generator
            .generate("A passage.", 1, QuestionType::FactualInfo, &CancellationToken::new())
            .await
            .unwrap();
        assert!(question.paragraph_for_insertion.is_none());
        assert!(question.sentence_to_insert.is_none());
    }
}
