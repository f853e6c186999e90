// src/handlers/content.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{bilet::BiletSummary, test_result::TestResult, topic::TopicSummary},
    storage::Storage,
    utils::jwt::OptionalClaims,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page_size: Option<i64>,
}

async fn user_results(
    storage: &Storage,
    claims: &OptionalClaims,
) -> Result<Vec<TestResult>, AppError> {
    match &claims.0 {
        Some(claims) => Ok(storage.get_test_results(&claims.sub).await?),
        None => Ok(Vec::new()),
    }
}

/// Lists bilets ordered by number, each annotated with the requesting
/// user's most recent attempt (pass status and correct-answer count).
/// Unauthenticated requests see "no history".
pub async fn list_bilets(
    State(storage): State<Storage>,
    Extension(claims): Extension<OptionalClaims>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.page_size.unwrap_or(50).min(100);

    let bilets = storage.get_bilets(limit).await?;
    let results = user_results(&storage, &claims).await?;

    let summaries: Vec<BiletSummary> = bilets
        .into_iter()
        .map(|bilet| {
            // Results are newest-first, so `find` picks the latest attempt.
            let attempt = results
                .iter()
                .find(|r| r.test_type == "bilet" && r.test_id == bilet.id);

            BiletSummary {
                id: bilet.id,
                number: bilet.number,
                title: bilet.title,
                title_uz: bilet.title_uz,
                title_ru: bilet.title_ru,
                title_uzc: bilet.title_uzc,
                description: bilet.description,
                description_uz: bilet.description_uz,
                description_ru: bilet.description_ru,
                description_uzc: bilet.description_uzc,
                question_count: bilet.question_count,
                passed: attempt.map(|r| r.passed).unwrap_or(false),
                correct_answers: attempt.map(|r| r.correct_answers),
            }
        })
        .collect();

    Ok(Json(summaries))
}

/// Lists topics ordered by name, each annotated with the requesting
/// user's best attempt (pass status and best score).
pub async fn list_topics(
    State(storage): State<Storage>,
    Extension(claims): Extension<OptionalClaims>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.page_size.unwrap_or(50).min(100);

    let topics = storage.get_topics(limit).await?;
    let results = user_results(&storage, &claims).await?;

    let summaries: Vec<TopicSummary> = topics
        .into_iter()
        .map(|topic| {
            let best = results
                .iter()
                .filter(|r| r.test_type == "topic" && r.test_id == topic.id)
                .max_by_key(|r| r.score);

            TopicSummary {
                id: topic.id,
                name: topic.name,
                name_uz: topic.name_uz,
                name_ru: topic.name_ru,
                name_uzc: topic.name_uzc,
                description: topic.description,
                description_uz: topic.description_uz,
                description_ru: topic.description_ru,
                description_uzc: topic.description_uzc,
                question_count: topic.question_count,
                passed: best.map(|r| r.passed).unwrap_or(false),
                best_score: best.map(|r| r.score),
            }
        })
        .collect();

    Ok(Json(summaries))
}
