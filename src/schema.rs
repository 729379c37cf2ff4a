//! Schema contract for the two structured-generation request shapes.
//!
//! The JSON Schemas here are sent to the generative service so it can
//! constrain its own output; `parse_metadata`/`parse_question` re-verify
//! the result locally and fail explicitly rather than coerce.

use crate::error::GenerationError;
use crate::quiz::{Question, QuestionType, QuizMetadata};
use serde_json::{json, Value};

/// Schema for the quiz-level metadata call: a title plus the
/// introductory sentence shown above the prose-summary choices.
pub fn metadata_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "A short, descriptive title derived from the passage."
            },
            "summaryIntroductorySentence": {
                "type": "string",
                "description": "One sentence introducing a summary of the passage, used by the prose summary question."
            }
        },
        "required": ["title", "summaryIntroductorySentence"],
        "additionalProperties": false
    })
}

/// Schema for a single generated question. The three trailing fields are
/// nullable; they are only meaningful for Insert Text (paragraph and
/// sentence) and for types that highlight a word or sentence.
pub fn question_schema() -> Value {
    let type_labels: Vec<Value> = QuestionType::ALL
        .iter()
        .map(|t| json!(type_tag(*t)))
        .collect();

    json!({
        "type": "object",
        "properties": {
            "questionNumber": {
                "type": "integer",
                "description": "The 1-based question number, echoed from the request."
            },
            "questionType": {
                "type": "string",
                "enum": type_labels,
                "description": "The requested question type, echoed from the request."
            },
            "questionText": { "type": "string" },
            "choices": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "text": { "type": "string" },
                        "isCorrect": { "type": "boolean" }
                    },
                    "required": ["text", "isCorrect"],
                    "additionalProperties": false
                }
            },
            "hint": {
                "type": "string",
                "description": "A short hint that does not give the answer away."
            },
            "rationale": {
                "type": "string",
                "description": "Why the correct choice(s) are correct."
            },
            "relevantArticleSnippet": {
                "type": "string",
                "description": "A verbatim quotation from the passage supporting the answer."
            },
            "highlightedText": { "type": ["string", "null"] },
            "paragraphForInsertion": { "type": ["string", "null"] },
            "sentenceToInsert": { "type": ["string", "null"] }
        },
        "required": [
            "questionNumber",
            "questionType",
            "questionText",
            "choices",
            "hint",
            "rationale",
            "relevantArticleSnippet",
            "highlightedText",
            "paragraphForInsertion",
            "sentenceToInsert"
        ],
        "additionalProperties": false
    })
}

/// The wire tag for a question type. Matches the serde representation of
/// `QuestionType` so schema enum values and deserialization agree.
pub fn type_tag(qtype: QuestionType) -> &'static str {
    match qtype {
        QuestionType::FactualInfo => "FactualInfo",
        QuestionType::Vocabulary => "Vocabulary",
        QuestionType::Inference => "Inference",
        QuestionType::SentenceSimplification => "SentenceSimplification",
        QuestionType::NegativeFactualInfo => "NegativeFactualInfo",
        QuestionType::InsertText => "InsertText",
        QuestionType::ProseSummary => "ProseSummary",
    }
}

/// Parses service output against the metadata contract.
pub fn parse_metadata(value: Value) -> Result<QuizMetadata, GenerationError> {
    serde_json::from_value(value).map_err(|e| {
        GenerationError::service(format!("metadata response did not match the contract: {}", e))
    })
}

/// Parses service output against the question contract. Type-specific
/// constraints (choice counts, insertion markers) are checked afterwards
/// by the question generator, not here.
pub fn parse_question(value: Value) -> Result<Question, GenerationError> {
    serde_json::from_value(value).map_err(|e| {
        GenerationError::service(format!("question response did not match the contract: {}", e))
    })
}
