// src/models/question.rs

use serde::Serialize;
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table.
///
/// A question belongs to at most one bilet and/or one topic (both foreign
/// keys nullable). Four-option multiple choice with a zero-based correct
/// answer index; `correct_answer` is assumed to be within the bounds of
/// `options`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    pub bilet_id: Option<String>,
    pub topic_id: Option<String>,

    /// Explicit ordering key within a bilet/topic. Creation timestamps are
    /// assigned in a tight loop during seeding and can collide.
    pub position: i64,

    pub question_text: String,
    pub question_text_uz: String,
    pub question_text_ru: String,
    #[serde(rename = "questionTextUzC")]
    pub question_text_uzc: String,

    /// Option lists stored as JSON arrays, one per language variant.
    pub options: Json<Vec<String>>,
    pub options_uz: Json<Vec<String>>,
    pub options_ru: Json<Vec<String>>,
    #[serde(rename = "optionsUzC")]
    pub options_uzc: Json<Vec<String>>,

    /// Zero-based index into `options`.
    pub correct_answer: i64,

    pub explanation: Option<String>,
    pub explanation_uz: Option<String>,
    pub explanation_ru: Option<String>,
    #[serde(rename = "explanationUzC")]
    pub explanation_uzc: Option<String>,

    pub image_url: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Client-facing question shape. Deliberately excludes `correct_answer`
/// and the explanations so the served payload carries no answer key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: String,
    pub question_text: String,
    pub question_text_uz: String,
    pub question_text_ru: String,
    #[serde(rename = "questionTextUzC")]
    pub question_text_uzc: String,
    pub options: Json<Vec<String>>,
    pub options_uz: Json<Vec<String>>,
    pub options_ru: Json<Vec<String>>,
    #[serde(rename = "optionsUzC")]
    pub options_uzc: Json<Vec<String>>,
    pub image_url: Option<String>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            question_text_uz: q.question_text_uz,
            question_text_ru: q.question_text_ru,
            question_text_uzc: q.question_text_uzc,
            options: q.options,
            options_uz: q.options_uz,
            options_ru: q.options_ru,
            options_uzc: q.options_uzc,
            image_url: q.image_url,
        }
    }
}

/// Insert subset for a question; used by seeding and tests.
#[derive(Debug)]
pub struct NewQuestion {
    pub bilet_id: Option<String>,
    pub topic_id: Option<String>,
    pub position: i64,
    pub question_text: String,
    pub question_text_uz: String,
    pub question_text_ru: String,
    pub question_text_uzc: String,
    pub options: Vec<String>,
    pub options_uz: Vec<String>,
    pub options_ru: Vec<String>,
    pub options_uzc: Vec<String>,
    pub correct_answer: i64,
    pub explanation: Option<String>,
    pub explanation_uz: Option<String>,
    pub explanation_ru: Option<String>,
    pub explanation_uzc: Option<String>,
    pub image_url: Option<String>,
}
