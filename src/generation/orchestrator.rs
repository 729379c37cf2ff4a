use super::{GenerationProgress, ProgressCallback, QuestionPlan};
use crate::ai::providers::GenerativeProvider;
use crate::error::GenerationError;
use crate::generation::{MetadataGenerator, QuestionGenerator};
use crate::quiz::{Question, Quiz};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Drives one passage through metadata generation and the concurrent
/// question fan-out, aggregating completion into a monotonic progress
/// signal and assembling the final quiz in plan order.
///
/// Completion order of the concurrent calls is concurrency noise: the
/// assembled quiz is always sorted by question number, and a run either
/// yields the full plan or one aggregated failure — never a partial quiz.
pub struct QuizOrchestrator {
    provider: Arc<dyn GenerativeProvider>,
    plan: QuestionPlan,
}

impl QuizOrchestrator {
    pub fn new(provider: Arc<dyn GenerativeProvider>, plan: QuestionPlan) -> Self {
        Self { provider, plan }
    }

    pub fn with_standard_plan(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self::new(provider, QuestionPlan::standard())
    }

    pub fn plan(&self) -> &QuestionPlan {
        &self.plan
    }

    pub async fn generate_quiz(
        &self,
        passage: &str,
        progress: Option<ProgressCallback>,
        cancel: CancellationToken,
    ) -> Result<Quiz, GenerationError> {
        if passage.trim().is_empty() {
            return Err(GenerationError::EmptyArticle);
        }

        let emit = |stage: String, percentage: f32| {
            if let Some(callback) = &progress {
                callback(GenerationProgress { stage, percentage });
            }
        };

        // Stage 1: metadata, sequenced before the question fan-out.
        emit("metadata".to_string(), 0.0);
        let metadata = MetadataGenerator::new(self.provider.clone())
            .generate(passage, &cancel)
            .await?;
        emit("metadata".to_string(), 10.0);

        let total = self.plan.len();
        log::info!(
            "Generating {} questions concurrently via {} ({})",
            total,
            self.provider.name(),
            self.provider.model()
        );

        // Fan-out: every plan entry gets its own task; completions flow
        // back over one channel consumed by this single aggregator.
        let (tx, mut rx) = mpsc::channel::<(u32, Result<Question, GenerationError>)>(total.max(1));
        for (number, qtype) in self.plan.entries() {
            let tx = tx.clone();
            let provider = self.provider.clone();
            let passage = passage.to_string();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let generator = QuestionGenerator::new(provider);
                let result = generator.generate(&passage, number, qtype, &cancel).await;
                // The aggregator only hangs up once all events are in.
                let _ = tx.send((number, result)).await;
            });
        }
        drop(tx);

        // Join barrier: wait for all tasks to settle, in whatever order
        // they finish. Progress tracks the completion count only.
        let mut questions: Vec<Question> = Vec::with_capacity(total);
        let mut failures: Vec<GenerationError> = Vec::new();
        let mut completed = 0usize;
        while let Some((number, result)) = rx.recv().await {
            completed += 1;
            match result {
                Ok(question) => questions.push(question),
                Err(err) => {
                    log::warn!("Question {} failed: {}", number, err);
                    failures.push(err);
                }
            }
            let percentage = 10.0 + (completed as f32 / total as f32) * 80.0;
            let stage = if completed < total {
                format!("question {}", completed + 1)
            } else {
                "questions complete".to_string()
            };
            emit(stage, percentage);
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| match f {
                GenerationError::Question { number, .. } => *number,
                _ => u32::MAX,
            });
            let aggregate = GenerationError::Aggregate { failures };
            log::error!("{}", aggregate);
            return Err(aggregate);
        }

        // Restore plan order; completion order must never leak out.
        questions.sort_by_key(|q| q.question_number);
        for (index, question) in questions.iter().enumerate() {
            if question.question_number != index as u32 + 1 {
                return Err(GenerationError::service(format!(
                    "assembled questions are not contiguous at position {}",
                    index + 1
                )));
            }
        }

        emit("assembling".to_string(), 95.0);
        let quiz = Quiz {
            title: metadata.title,
            summary_introductory_sentence: metadata.summary_introductory_sentence,
            questions,
        };
        emit("done".to_string(), 100.0);
        Ok(quiz)
    }
}
