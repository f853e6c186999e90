// src/handlers/results.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::test_result::TestResultResponse,
    storage::Storage,
    utils::jwt::Claims,
};

/// Lists the authenticated user's past results, newest first, each
/// enriched with a human-readable test name resolved from the referenced
/// bilet or topic.
pub async fn list_results(
    State(storage): State<Storage>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let results = storage.get_test_results(&claims.sub).await?;

    let mut enriched = Vec::with_capacity(results.len());
    for result in results {
        let test_name = match result.test_type.as_str() {
            "bilet" => match storage.get_bilet(&result.test_id).await? {
                Some(bilet) => format!("Bilet {}", bilet.number),
                None => "Unknown Bilet".to_string(),
            },
            "topic" => match storage.get_topic(&result.test_id).await? {
                Some(topic) => topic.name,
                None => "Unknown Topic".to_string(),
            },
            "real" => "Real Test".to_string(),
            _ => "Unknown Test".to_string(),
        };

        enriched.push(TestResultResponse {
            id: result.id,
            test_type: result.test_type,
            test_name,
            score: result.score,
            total_questions: result.total_questions,
            correct_answers: result.correct_answers,
            passed: result.passed,
            time_spent: result.time_spent,
            completed_at: result.completed_at,
        });
    }

    Ok(Json(enriched))
}

/// Returns the authenticated user's aggregate statistics.
pub async fn get_stats(
    State(storage): State<Storage>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let stats = storage.get_user_stats(&claims.sub).await?;
    Ok(Json(stats))
}
