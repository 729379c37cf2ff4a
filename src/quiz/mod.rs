use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The four insertion-point markers an InsertText paragraph must carry,
/// in document order.
pub const INSERTION_MARKERS: [&str; 4] = ["[A]", "[B]", "[C]", "[D]"];

/// The closed set of question types a quiz can contain. Fixed at design
/// time, never produced by the generative service on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    FactualInfo,
    Vocabulary,
    Inference,
    SentenceSimplification,
    NegativeFactualInfo,
    InsertText,
    ProseSummary,
}

impl QuestionType {
    pub const ALL: [QuestionType; 7] = [
        QuestionType::FactualInfo,
        QuestionType::Vocabulary,
        QuestionType::Inference,
        QuestionType::SentenceSimplification,
        QuestionType::NegativeFactualInfo,
        QuestionType::InsertText,
        QuestionType::ProseSummary,
    ];

    /// Human-readable label used in prompts and progress text.
    pub fn as_label(&self) -> &'static str {
        match self {
            QuestionType::FactualInfo => "Factual Information",
            QuestionType::Vocabulary => "Vocabulary",
            QuestionType::Inference => "Inference",
            QuestionType::SentenceSimplification => "Sentence Simplification",
            QuestionType::NegativeFactualInfo => "Negative Factual Information",
            QuestionType::InsertText => "Insert Text",
            QuestionType::ProseSummary => "Prose Summary",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One answer choice. Several choices per question may be correct
/// (Prose Summary), so correctness lives on the choice rather than as a
/// single index on the question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    pub is_correct: bool,
}

/// A single generated question. Wire field names are camelCase so the
/// structured-output schema and this type describe the same JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_number: u32,
    pub question_type: QuestionType,
    pub question_text: String,
    pub choices: Vec<Choice>,
    pub hint: String,
    pub rationale: String,
    pub relevant_article_snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_for_insertion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_to_insert: Option<String>,
}

impl Question {
    /// Indices of the choices marked correct, as a set.
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_correct)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Quiz-level metadata, produced once per quiz independently of the
/// per-question calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMetadata {
    pub title: String,
    pub summary_introductory_sentence: String,
}

/// An assembled quiz. `questions` is sorted ascending by question number
/// and covers 1..N contiguously; the orchestrator enforces this before
/// handing the quiz out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub summary_introductory_sentence: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Checks that `paragraph` contains each insertion marker exactly once,
/// in left-to-right document order.
pub fn insertion_markers_valid(paragraph: &str) -> bool {
    let mut previous: Option<usize> = None;
    for marker in INSERTION_MARKERS {
        let mut occurrences = paragraph.match_indices(marker);
        let position = match occurrences.next() {
            Some((pos, _)) => pos,
            None => return false,
        };
        if occurrences.next().is_some() {
            return false;
        }
        if let Some(prev) = previous {
            if position <= prev {
                return false;
            }
        }
        previous = Some(position);
    }
    true
}
