pub mod metadata;
pub mod orchestrator;
pub mod plan;
pub mod question;

pub use metadata::MetadataGenerator;
pub use orchestrator::QuizOrchestrator;
pub use plan::QuestionPlan;
pub use question::QuestionGenerator;

use serde::Serialize;
use std::sync::Arc;

/// One progress emission during a `generate_quiz` call. Percentages are
/// monotonically non-decreasing across a single run and end at 100 on
/// success; the stage label only reflects the count of completions so
/// far, not a specific question.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationProgress {
    pub stage: String,
    pub percentage: f32,
}

/// Caller-supplied, fire-and-forget progress sink. Never invoked after
/// the generation call has settled.
pub type ProgressCallback = Arc<dyn Fn(GenerationProgress) + Send + Sync>;
