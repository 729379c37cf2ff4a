//! Append-only, retake-aware quiz history. One group per generated
//! article+quiz pair; attempts within a group are only ever appended,
//! never reordered or mutated.

pub mod persistence;

pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};

use crate::grading::AnswerSlot;
use crate::quiz::Quiz;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const HISTORY_KEY: &str = "quizforge.history";
const LAST_USER_KEY: &str = "quizforge.last_user";

/// One completed run through a quiz. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    pub user_answers: Vec<AnswerSlot>,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

/// The persistent record tying one article+quiz pair to every attempt
/// made against it. Owns its attempts; attempts are never shared across
/// groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizHistoryGroup {
    pub id: String,
    pub article: String,
    pub quiz: Quiz,
    pub title: String,
    pub attempts: Vec<QuizAttempt>,
    pub last_attempt_timestamp: DateTime<Utc>,
}

type HistoryMap = HashMap<String, Vec<QuizHistoryGroup>>;

/// Per-user quiz history over an injected key-value port. The whole
/// per-installation history lives under one namespaced key as a
/// user-id -> groups map; the last-used user id sits beside it.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All groups for the user, descending by last attempt time.
    pub async fn get_history(&self, user: &str) -> Result<Vec<QuizHistoryGroup>> {
        let map = self.load_map().await?;
        let mut groups = map.get(user).cloned().unwrap_or_default();
        sort_descending(&mut groups);
        Ok(groups)
    }

    /// Appends an attempt to `existing_group_id` if it names a group the
    /// user owns, otherwise creates a new group around a fresh attempt.
    /// Returns the updated, re-sorted history.
    pub async fn save_attempt(
        &self,
        user: &str,
        article: &str,
        quiz: &Quiz,
        answers: &[AnswerSlot],
        score: u32,
        existing_group_id: Option<&str>,
    ) -> Result<Vec<QuizHistoryGroup>> {
        let mut map = self.load_map().await?;
        let groups = map.entry(user.to_string()).or_default();

        let attempt = QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_answers: answers.to_vec(),
            score,
            timestamp: Utc::now(),
        };

        let existing = match existing_group_id {
            Some(id) => groups.iter_mut().find(|g| g.id == id),
            None => None,
        };
        match existing {
            Some(group) => {
                log::debug!("Appending retake attempt to group {}", group.id);
                group.last_attempt_timestamp = attempt.timestamp;
                group.attempts.push(attempt);
            }
            None => {
                let group = QuizHistoryGroup {
                    id: Uuid::new_v4().to_string(),
                    article: article.to_string(),
                    quiz: quiz.clone(),
                    title: quiz.title.clone(),
                    last_attempt_timestamp: attempt.timestamp,
                    attempts: vec![attempt],
                };
                log::debug!("Creating history group {} for user {}", group.id, user);
                groups.push(group);
            }
        }

        sort_descending(groups);
        let updated = groups.clone();
        self.save_map(&map).await?;
        Ok(updated)
    }

    /// Removes the group and all its attempts. Deleting an unknown id is
    /// a no-op. Returns the updated history.
    pub async fn delete_group(&self, user: &str, group_id: &str) -> Result<Vec<QuizHistoryGroup>> {
        let mut map = self.load_map().await?;
        if let Some(groups) = map.get_mut(user) {
            groups.retain(|g| g.id != group_id);
        }
        let mut updated = map.get(user).cloned().unwrap_or_default();
        sort_descending(&mut updated);
        self.save_map(&map).await?;
        Ok(updated)
    }

    pub async fn last_user(&self) -> Result<Option<String>> {
        let bytes = self.store.get(LAST_USER_KEY).await?;
        Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
    }

    pub async fn set_last_user(&self, user: &str) -> Result<()> {
        self.store.set(LAST_USER_KEY, user.as_bytes().to_vec()).await
    }

    async fn load_map(&self) -> Result<HistoryMap> {
        match self.store.get(HISTORY_KEY).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(HistoryMap::new()),
        }
    }

    async fn save_map(&self, map: &HistoryMap) -> Result<()> {
        self.store.set(HISTORY_KEY, serde_json::to_vec(map)?).await
    }
}

fn sort_descending(groups: &mut [QuizHistoryGroup]) {
    groups.sort_by(|a, b| b.last_attempt_timestamp.cmp(&a.last_attempt_timestamp));
}
