//! Personalization — learner profiles, tailored content, recommendations.
//!
//! DESIGN
//! ======
//! One profile per user. Tailored content is derived from the stored account
//! experience levels and cached per `(content_id, user_id)`; re-requesting it
//! refreshes the cached copy in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::services::{catalog, content};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalizationProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_difficulty: Option<DifficultyLevel>,
    pub learning_style: Option<LearningStyle>,
    pub software_experience: Option<String>,
    pub hardware_experience: Option<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    pub preferences: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body for both create-or-update and update. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub preferred_difficulty: Option<DifficultyLevel>,
    pub learning_style: Option<LearningStyle>,
    pub software_experience: Option<String>,
    pub hardware_experience: Option<String>,
    pub interests: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
    pub preferences: Option<Value>,
}

impl ProfileUpdate {
    fn apply(self, profile: &mut PersonalizationProfile) {
        if let Some(v) = self.preferred_difficulty {
            profile.preferred_difficulty = Some(v);
        }
        if let Some(v) = self.learning_style {
            profile.learning_style = Some(v);
        }
        if let Some(v) = self.software_experience {
            profile.software_experience = Some(v);
        }
        if let Some(v) = self.hardware_experience {
            profile.hardware_experience = Some(v);
        }
        if let Some(v) = self.interests {
            profile.interests = v;
        }
        if let Some(v) = self.goals {
            profile.goals = v;
        }
        if let Some(v) = self.preferences {
            profile.preferences = v;
        }
        profile.updated_at = OffsetDateTime::now_utc();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentPersonalization {
    pub id: Uuid,
    pub content_id: Uuid,
    pub personalized_content: String,
    pub difficulty_level: Option<DifficultyLevel>,
    /// User the copy was tailored for.
    pub target_audience: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub user_id: Uuid,
    pub content_id: String,
    /// `curriculum` or `difficulty`.
    pub recommendation_type: &'static str,
    pub reason: String,
    pub confidence: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const MAX_INTEREST_RECOMMENDATIONS: usize = 3;

// =============================================================================
// PROFILES
// =============================================================================

/// Create the caller's profile, or merge `update` into the existing one.
pub async fn upsert_profile(state: &AppState, user_id: Uuid, update: ProfileUpdate) -> PersonalizationProfile {
    let now = OffsetDateTime::now_utc();
    let mut table = state.profiles.write().await;
    let profile = table.entry(user_id).or_insert_with(|| {
        info!(%user_id, "personalization profile created");
        PersonalizationProfile {
            id: Uuid::new_v4(),
            user_id,
            preferred_difficulty: None,
            learning_style: None,
            software_experience: None,
            hardware_experience: None,
            interests: Vec::new(),
            goals: Vec::new(),
            preferences: Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    });
    update.apply(profile);
    profile.clone()
}

pub async fn get_profile(state: &AppState, user_id: Uuid) -> Option<PersonalizationProfile> {
    state.profiles.read().await.get(&user_id).cloned()
}

/// Merge into an existing profile. `None` when the user has none yet.
pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Option<PersonalizationProfile> {
    let mut table = state.profiles.write().await;
    let profile = table.get_mut(&user_id)?;
    update.apply(profile);
    Some(profile.clone())
}

// =============================================================================
// TAILORED CONTENT
// =============================================================================

/// Combined level from account experience. Both must be present, otherwise
/// the learner is treated as a beginner.
#[must_use]
pub fn experience_level(software: Option<&str>, hardware: Option<&str>) -> DifficultyLevel {
    let (Some(sw), Some(hw)) = (software, hardware) else {
        return DifficultyLevel::Beginner;
    };
    if sw == "advanced" || hw == "advanced" {
        DifficultyLevel::Advanced
    } else if sw == "intermediate" || hw == "intermediate" {
        DifficultyLevel::Intermediate
    } else {
        DifficultyLevel::Beginner
    }
}

#[must_use]
pub fn tailor(original: &str, level: DifficultyLevel) -> String {
    format!("Personalized for {} level:\n\n{original}", level.as_str())
}

/// Tailor `content_id` for `user_id`. `None` when the user has no profile or
/// the content does not exist. `experience` is the account's
/// `(software, hardware)` pair.
pub async fn personalized_content(
    state: &AppState,
    user_id: Uuid,
    content_id: Uuid,
    experience: (Option<&str>, Option<&str>),
) -> Option<ContentPersonalization> {
    let profile = get_profile(state, user_id).await?;
    let original = content::get_content(state, content_id).await?;
    let text = tailor(&original.content, experience_level(experience.0, experience.1));

    let now = OffsetDateTime::now_utc();
    let mut table = state.personalized.write().await;
    let entry = table
        .entry((content_id, user_id))
        .or_insert_with(|| ContentPersonalization {
            id: Uuid::new_v4(),
            content_id,
            personalized_content: String::new(),
            difficulty_level: None,
            target_audience: user_id,
            created_at: now,
            updated_at: now,
        });
    entry.personalized_content = text;
    entry.difficulty_level = profile.preferred_difficulty;
    entry.updated_at = now;
    Some(entry.clone())
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

#[must_use]
pub fn recommend(profile: &PersonalizationProfile) -> Vec<Recommendation> {
    let now = OffsetDateTime::now_utc();
    let user_id = profile.user_id;
    let mut recs: Vec<Recommendation> = profile
        .interests
        .iter()
        .take(MAX_INTEREST_RECOMMENDATIONS)
        .enumerate()
        .map(|(i, interest)| Recommendation {
            id: format!("rec_{user_id}_{i}"),
            user_id,
            content_id: format!("content_{interest}"),
            recommendation_type: "curriculum",
            reason: format!("Recommended based on your interest in {interest}"),
            confidence: 0.8,
            created_at: now,
        })
        .collect();

    if let Some(difficulty) = profile.preferred_difficulty {
        recs.push(Recommendation {
            id: format!("rec_diff_{user_id}"),
            user_id,
            content_id: "difficulty_level".into(),
            recommendation_type: "difficulty",
            reason: format!("Recommended difficulty level: {}", difficulty.as_str()),
            confidence: 0.9,
            created_at: now,
        });
    }
    recs
}

/// Empty when the user has no profile.
pub async fn recommendations(state: &AppState, user_id: Uuid) -> Vec<Recommendation> {
    get_profile(state, user_id)
        .await
        .map(|p| recommend(&p))
        .unwrap_or_default()
}

/// Study order. Every learner follows the full course outline.
#[must_use]
pub fn learning_path() -> Vec<String> {
    catalog::learning_path_ids()
}

#[cfg(test)]
#[path = "personalization_test.rs"]
mod tests;
