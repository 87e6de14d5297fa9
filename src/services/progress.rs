//! Learner progress — per-content completion, quiz attempts, learning paths.
//!
//! DESIGN
//! ======
//! Progress is keyed by `(user_id, content_id)` so a repeated upsert for the
//! same pair overwrites the existing record instead of adding a second one.
//! Content ids are opaque strings: chapters from the fixed catalog and rows
//! from the content table are tracked alike.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

// =============================================================================
// PROGRESS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserProgress {
    pub user_id: Uuid,
    pub content_id: String,
    pub progress_percentage: f64,
    /// Seconds.
    pub time_spent: i64,
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressInput {
    pub content_id: String,
    pub progress_percentage: f64,
    pub time_spent: i64,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdate {
    pub progress_percentage: Option<f64>,
    pub time_spent: Option<i64>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total_content: usize,
    pub completed_content: usize,
    pub in_progress_content: usize,
    pub total_time_spent: i64,
    pub average_progress: f64,
    pub completion_percentage: f64,
}

/// Insert or overwrite the record for `(user_id, input.content_id)`.
pub async fn upsert_progress(state: &AppState, user_id: Uuid, input: ProgressInput) -> UserProgress {
    let now = OffsetDateTime::now_utc();
    let key = (user_id, input.content_id.clone());
    let mut table = state.progress.write().await;
    let record = table.entry(key).or_insert_with(|| UserProgress {
        user_id,
        content_id: input.content_id,
        progress_percentage: 0.0,
        time_spent: 0,
        is_completed: false,
        created_at: now,
        updated_at: now,
    });
    record.progress_percentage = input.progress_percentage;
    record.time_spent = input.time_spent;
    record.is_completed = input.is_completed;
    record.updated_at = now;
    info!(%user_id, content_id = %record.content_id, pct = record.progress_percentage, "progress recorded");
    record.clone()
}

pub async fn get_progress(state: &AppState, user_id: Uuid, content_id: &str) -> Option<UserProgress> {
    state
        .progress
        .read()
        .await
        .get(&(user_id, content_id.to_string()))
        .cloned()
}

/// Every record for `user_id`, most recently updated first.
pub async fn list_progress(state: &AppState, user_id: Uuid) -> Vec<UserProgress> {
    let mut rows: Vec<UserProgress> = state
        .progress
        .read()
        .await
        .values()
        .filter(|p| p.user_id == user_id)
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    rows
}

pub async fn update_progress(
    state: &AppState,
    user_id: Uuid,
    content_id: &str,
    update: ProgressUpdate,
) -> Option<UserProgress> {
    let mut table = state.progress.write().await;
    let record = table.get_mut(&(user_id, content_id.to_string()))?;
    if let Some(pct) = update.progress_percentage {
        record.progress_percentage = pct;
    }
    if let Some(secs) = update.time_spent {
        record.time_spent = secs;
    }
    if let Some(done) = update.is_completed {
        record.is_completed = done;
    }
    record.updated_at = OffsetDateTime::now_utc();
    Some(record.clone())
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[UserProgress]) -> CompletionStats {
    let total = records.len();
    let completed = records.iter().filter(|p| p.is_completed).count();
    let in_progress = records
        .iter()
        .filter(|p| p.progress_percentage > 0.0 && !p.is_completed)
        .count();
    let total_time_spent = records.iter().map(|p| p.time_spent).sum();
    let (average_progress, completion_percentage) = if total == 0 {
        (0.0, 0.0)
    } else {
        let sum: f64 = records.iter().map(|p| p.progress_percentage).sum();
        (sum / total as f64, completed as f64 / total as f64 * 100.0)
    };
    CompletionStats {
        total_content: total,
        completed_content: completed,
        in_progress_content: in_progress,
        total_time_spent,
        average_progress,
        completion_percentage,
    }
}

pub async fn completion_stats(state: &AppState, user_id: Uuid) -> CompletionStats {
    summarize(&list_progress(state, user_id).await)
}

// =============================================================================
// QUIZ ATTEMPTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: String,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Seconds.
    pub time_taken: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuizAttempt {
    pub content_id: String,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub time_taken: i64,
}

pub async fn record_quiz_attempt(state: &AppState, user_id: Uuid, new: NewQuizAttempt) -> QuizAttempt {
    let attempt = QuizAttempt {
        id: Uuid::new_v4(),
        user_id,
        content_id: new.content_id,
        score: new.score,
        total_questions: new.total_questions,
        correct_answers: new.correct_answers,
        time_taken: new.time_taken,
        created_at: OffsetDateTime::now_utc(),
    };
    state.quiz_attempts.write().await.push(attempt.clone());
    info!(%user_id, content_id = %attempt.content_id, score = attempt.score, "quiz attempt recorded");
    attempt
}

/// Attempts by `user_id` on `content_id`, oldest first.
pub async fn list_quiz_attempts(state: &AppState, user_id: Uuid, content_id: &str) -> Vec<QuizAttempt> {
    state
        .quiz_attempts
        .read()
        .await
        .iter()
        .filter(|a| a.user_id == user_id && a.content_id == content_id)
        .cloned()
        .collect()
}

// =============================================================================
// LEARNING PATHS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LearningPath {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub content_ids: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLearningPath {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearningPathUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content_ids: Option<Vec<String>>,
}

pub async fn create_learning_path(state: &AppState, user_id: Uuid, new: NewLearningPath) -> LearningPath {
    let now = OffsetDateTime::now_utc();
    let path = LearningPath {
        id: Uuid::new_v4(),
        user_id,
        name: new.name,
        description: new.description,
        content_ids: new.content_ids,
        created_at: now,
        updated_at: now,
    };
    state.learning_paths.write().await.insert(path.id, path.clone());
    info!(%user_id, path_id = %path.id, "learning path created");
    path
}

/// Paths owned by `user_id`, oldest first.
pub async fn list_learning_paths(state: &AppState, user_id: Uuid) -> Vec<LearningPath> {
    let mut rows: Vec<LearningPath> = state
        .learning_paths
        .read()
        .await
        .values()
        .filter(|p| p.user_id == user_id)
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    rows
}

/// `None` when missing or owned by someone else.
pub async fn get_learning_path(state: &AppState, user_id: Uuid, path_id: Uuid) -> Option<LearningPath> {
    state
        .learning_paths
        .read()
        .await
        .get(&path_id)
        .filter(|p| p.user_id == user_id)
        .cloned()
}

pub async fn update_learning_path(
    state: &AppState,
    user_id: Uuid,
    path_id: Uuid,
    update: LearningPathUpdate,
) -> Option<LearningPath> {
    let mut table = state.learning_paths.write().await;
    let path = table.get_mut(&path_id).filter(|p| p.user_id == user_id)?;
    if let Some(name) = update.name {
        path.name = name;
    }
    if let Some(description) = update.description {
        path.description = description;
    }
    if let Some(content_ids) = update.content_ids {
        path.content_ids = content_ids;
    }
    path.updated_at = OffsetDateTime::now_utc();
    Some(path.clone())
}

/// Returns `false` when missing or owned by someone else.
pub async fn delete_learning_path(state: &AppState, user_id: Uuid, path_id: Uuid) -> bool {
    let mut table = state.learning_paths.write().await;
    if table.get(&path_id).is_some_and(|p| p.user_id == user_id) {
        table.remove(&path_id);
        info!(%user_id, %path_id, "learning path deleted");
        true
    } else {
        false
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
