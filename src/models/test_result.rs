// src/models/test_result.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use std::collections::HashMap;

use crate::models::question::PublicQuestion;

/// Represents the 'test_results' table. Created exactly once per
/// submission; never mutated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,

    pub user_id: String,

    /// One of 'bilet', 'topic', or 'real'; any other value is rejected at
    /// the route layer.
    pub test_type: String,

    /// Referenced bilet/topic id, or a synthetic id for 'real' mode.
    pub test_id: String,

    /// Integer percentage 0-100.
    pub score: i64,

    pub total_questions: i64,
    pub correct_answers: i64,

    /// Elapsed time in seconds, as reported by the client.
    pub time_spent: i64,

    /// Raw submitted answer map: question id -> chosen option index.
    pub answers: Json<HashMap<String, i64>>,

    pub passed: bool,

    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Insert subset for a test result.
#[derive(Debug)]
pub struct NewTestResult {
    pub user_id: String,
    pub test_type: String,
    pub test_id: String,
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub time_spent: i64,
    pub answers: HashMap<String, i64>,
    pub passed: bool,
}

/// DTO for a served test.
///
/// For 'real' tests `exam_token` pins the sampled question set so the
/// submission is scored against exactly what was displayed; bilet and topic
/// sets resolve deterministically and carry no token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub questions: Vec<PublicQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_token: Option<String>,
}

/// DTO for submitting a test attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    /// Question id -> chosen option index.
    #[serde(default)]
    pub answers: HashMap<String, i64>,

    /// Elapsed seconds; defaults to 0 when the client omits it.
    #[serde(default)]
    pub time_spent: i64,

    /// Required for 'real' submissions; ignored otherwise.
    pub exam_token: Option<String>,
}

/// DTO for the computed outcome of a submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestResponse {
    pub id: String,
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub passed: bool,
    pub time_spent: i64,
}

/// Historical result enriched with a human-readable test name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultResponse {
    pub id: String,
    pub test_type: String,
    pub test_name: String,
    pub score: i64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub passed: bool,
    pub time_spent: i64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate statistics over a user's results.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_tests: i64,
    pub average_score: i64,
    pub study_streak: i64,
}
