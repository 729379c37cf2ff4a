use crate::quiz::QuestionType;
use thiserror::Error;

/// Failures that can surface from the generation pipeline. The
/// orchestrator is the only place that aggregates; the generators wrap
/// their own failures with the question number and type that failed.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The upstream service call failed or returned output that does not
    /// conform to the schema contract.
    #[error("generation service error: {message}")]
    Service { message: String },

    /// The pipeline was invoked with no usable passage text.
    #[error("article text is empty")]
    EmptyArticle,

    /// A single question's generation failed, with the number and type
    /// preserved for diagnosis.
    #[error("question {number} ({qtype}) failed: {source}")]
    Question {
        number: u32,
        qtype: QuestionType,
        #[source]
        source: Box<GenerationError>,
    },

    /// One or more concurrent question calls failed; the whole quiz is
    /// voided (all-or-nothing, no partial quiz).
    #[error("{}", summarize(.failures))]
    Aggregate { failures: Vec<GenerationError> },

    #[error("generation was cancelled")]
    Cancelled,
}

impl GenerationError {
    pub fn service(message: impl Into<String>) -> Self {
        GenerationError::Service { message: message.into() }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Service { message: err.to_string() }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Service { message: format!("non-conforming structured output: {}", err) }
    }
}

fn summarize(failures: &[GenerationError]) -> String {
    let details: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
    format!(
        "quiz generation failed: {} of the question calls did not succeed: {}",
        failures.len(),
        details.join("; ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_context_preserved() {
        let err = GenerationError::Question {
            number: 9,
            qtype: QuestionType::InsertText,
            source: Box::new(GenerationError::service("bad markers")),
        };
        let text = err.to_string();
        assert!(text.contains('9'));
        assert!(text.contains("Insert Text"));
        assert!(text.contains("bad markers"));
    }

    #[test]
    fn test_aggregate_summary_counts_failures() {
        let err = GenerationError::Aggregate {
            failures: vec![
                GenerationError::service("one"),
                GenerationError::service("two"),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 of the question calls"));
        assert!(text.contains("one"));
        assert!(text.contains("two"));
    }
}
