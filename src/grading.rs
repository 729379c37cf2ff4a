//! Deterministic grading: a question is correct iff the user's selected
//! index set is exactly the correct index set. No partial credit; extra
//! and missing selections both count as wrong.

use crate::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One answer slot per question: `None` if unanswered, otherwise the
/// chosen choice indices (order and duplicates irrelevant).
pub type AnswerSlot = Option<Vec<usize>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub per_question: Vec<bool>,
    pub score: u32,
}

pub fn grade(quiz: &Quiz, answers: &[AnswerSlot]) -> GradeReport {
    let mut per_question = Vec::with_capacity(quiz.questions.len());
    for (index, question) in quiz.questions.iter().enumerate() {
        let correct = question.correct_indices();
        let selected = answers.get(index).and_then(|slot| slot.as_ref());
        let is_correct = match selected {
            // A question with no correct choice never scores.
            Some(chosen) if !correct.is_empty() => {
                let chosen: BTreeSet<usize> = chosen.iter().copied().collect();
                chosen == correct
            }
            _ => false,
        };
        per_question.push(is_correct);
    }
    let score = per_question.iter().filter(|c| **c).count() as u32;
    GradeReport { per_question, score }
}
