// src/models/bilet.rs

use serde::Serialize;
use sqlx::FromRow;

/// Represents the 'bilets' table: a fixed, numbered practice question set
/// analogous to an official exam form. Immutable after seeding.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bilet {
    pub id: String,

    /// Sequential, unique bilet number shown to the user.
    pub number: i64,

    pub title: String,
    pub title_uz: String,
    pub title_ru: String,
    #[serde(rename = "titleUzC")]
    pub title_uzc: String,

    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    #[serde(rename = "descriptionUzC")]
    pub description_uzc: Option<String>,

    pub question_count: i64,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert subset for a bilet; used by seeding and tests.
#[derive(Debug)]
pub struct NewBilet {
    pub number: i64,
    pub title: String,
    pub title_uz: String,
    pub title_ru: String,
    pub title_uzc: String,
    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub description_uzc: Option<String>,
    pub question_count: i64,
}

/// Listing entry annotated with the requesting user's history for this
/// bilet (false/None when unauthenticated or never attempted).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiletSummary {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub title_uz: String,
    pub title_ru: String,
    #[serde(rename = "titleUzC")]
    pub title_uzc: String,
    pub description: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    #[serde(rename = "descriptionUzC")]
    pub description_uzc: Option<String>,
    pub question_count: i64,
    pub passed: bool,
    pub correct_answers: Option<i64>,
}
