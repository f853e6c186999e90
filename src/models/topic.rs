// src/models/topic.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'topics' table: a thematic grouping of questions
/// independent of bilet membership. Immutable after seeding.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,

    /// Unique default (legacy) name; the localized variants follow.
    pub name: String,
    pub name_uz: String,
    pub name_ru: String,
    #[serde(rename = "nameUzC")]
    pub name_uzc: String,

    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    #[serde(rename = "descriptionUzC")]
    pub description_uzc: Option<String>,

    pub question_count: i64,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert subset for a topic; used by seeding and tests.
#[derive(Debug)]
pub struct NewTopic {
    pub name: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_uzc: String,
    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub description_uzc: Option<String>,
    pub question_count: i64,
}

/// Listing entry annotated with the requesting user's best attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: String,
    pub name: String,
    pub name_uz: String,
    pub name_ru: String,
    #[serde(rename = "nameUzC")]
    pub name_uzc: String,
    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    #[serde(rename = "descriptionUzC")]
    pub description_uzc: Option<String>,
    pub question_count: i64,
    pub passed: bool,
    pub best_score: Option<i64>,
}
