//! quizforge — turns a reading passage into a structured, TOEFL-style
//! multi-question quiz by orchestrating schema-constrained calls to a
//! generative-text service, then grades attempts deterministically and
//! keeps an append-only, retake-aware history.
//!
//! This crate is a library core: the presentation layer, provider
//! credentials and the concrete key-value backend are supplied by the
//! host. See [`QuizOrchestrator`] for the generation entry point,
//! [`grade`] for grading and [`HistoryStore`] for persistence.

pub mod ai;
pub mod error;
pub mod generation;
pub mod grading;
pub mod history;
pub mod quiz;
pub mod schema;

pub use ai::providers::{
    GenerativeProvider, OllamaProvider, OpenAiProvider, ProviderConfig, ProviderKind,
    StructuredRequest,
};
pub use ai::{build_provider, PromptBuilder};
pub use error::GenerationError;
pub use generation::{
    GenerationProgress, MetadataGenerator, ProgressCallback, QuestionGenerator, QuestionPlan,
    QuizOrchestrator,
};
pub use grading::{grade, AnswerSlot, GradeReport};
pub use history::{
    HistoryStore, JsonFileStore, KeyValueStore, MemoryStore, QuizAttempt, QuizHistoryGroup,
};
pub use quiz::{Choice, Question, QuestionType, Quiz, QuizMetadata};
