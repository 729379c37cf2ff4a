use crate::quiz::QuestionType;
use serde::{Deserialize, Serialize};

/// The ordered question-type policy for one generation run. Entry `i`
/// becomes question number `i + 1`. The plan is injected into the
/// orchestrator so callers and tests can substitute shorter plans; the
/// passage never influences it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPlan {
    types: Vec<QuestionType>,
}

impl QuestionPlan {
    pub fn new(types: Vec<QuestionType>) -> Self {
        Self { types }
    }

    /// The standard 12-question TOEFL reading sequence.
    pub fn standard() -> Self {
        Self::new(vec![
            QuestionType::FactualInfo,
            QuestionType::Vocabulary,
            QuestionType::Inference,
            QuestionType::FactualInfo,
            QuestionType::SentenceSimplification,
            QuestionType::NegativeFactualInfo,
            QuestionType::Vocabulary,
            QuestionType::Inference,
            QuestionType::InsertText,
            QuestionType::FactualInfo,
            QuestionType::Inference,
            QuestionType::ProseSummary,
        ])
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// (question number, question type) pairs, numbered from 1.
    pub fn entries(&self) -> impl Iterator<Item = (u32, QuestionType)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (i as u32 + 1, *t))
    }

    pub fn type_for(&self, number: u32) -> Option<QuestionType> {
        self.types.get(number.checked_sub(1)? as usize).copied()
    }
}

impl Default for QuestionPlan {
    fn default() -> Self {
        Self::standard()
    }
}
