// src/handlers/test.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    config::{
        Config, EXAM_TOKEN_TTL_SECS, PASSING_SCORE, REAL_TEST_PASS_COUNT,
        REAL_TEST_QUESTION_COUNT,
    },
    error::AppError,
    models::{
        question::{PublicQuestion, Question},
        test_result::{NewTestResult, SubmitTestRequest, SubmitTestResponse, TestResponse},
    },
    storage::Storage,
    utils::jwt::{Claims, sign_exam_token, verify_exam_token},
};

/// Scores a submitted answer map against the (question id, correct index)
/// answer keys. Returns (correct count, total, score percentage 0-100).
/// Submitted ids outside the key set are ignored.
fn score_answers(keys: &[(String, i64)], answers: &HashMap<String, i64>) -> (i64, i64, i64) {
    let total = keys.len() as i64;

    let correct = keys
        .iter()
        .filter(|(id, correct_answer)| answers.get(id) == Some(correct_answer))
        .count() as i64;

    let score = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as i64
    };

    (correct, total, score)
}

/// Pass rule. The real exam allows three mistakes out of twenty, so the
/// threshold is a correct-answer count; practice modes use the percentage.
fn is_passed(test_type: &str, correct: i64, score: i64) -> bool {
    if test_type == "real" {
        correct >= REAL_TEST_PASS_COUNT
    } else {
        score >= PASSING_SCORE
    }
}

fn answer_keys(questions: &[Question]) -> Vec<(String, i64)> {
    questions
        .iter()
        .map(|q| (q.id.clone(), q.correct_answer))
        .collect()
}

/// Serves the question set for a test, with the answer key stripped.
///
/// 'bilet' and 'topic' resolve deterministically by id; 'real' samples 20
/// questions uniformly and pins the set with a signed exam token so the
/// submission is scored against exactly what was displayed.
pub async fn get_test(
    State(storage): State<Storage>,
    State(config): State<Config>,
    Path((test_type, test_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (questions, exam_token) = match test_type.as_str() {
        "bilet" => (storage.get_questions_by_bilet(&test_id).await?, None),
        "topic" => (storage.get_questions_by_topic(&test_id).await?, None),
        "real" => {
            let questions = storage
                .get_random_questions(REAL_TEST_QUESTION_COUNT)
                .await?;
            let ids = questions.iter().map(|q| q.id.clone()).collect();
            let token = sign_exam_token(ids, &config.jwt_secret, EXAM_TOKEN_TTL_SECS)?;
            (questions, Some(token))
        }
        _ => return Err(AppError::BadRequest("Invalid test type".to_string())),
    };

    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No questions found for this test".to_string(),
        ));
    }

    Ok(Json(TestResponse {
        questions: questions.into_iter().map(PublicQuestion::from).collect(),
        exam_token,
    }))
}

/// Scores a submission and persists the result.
///
/// Re-resolves the question set (for 'real': the pinned ids from the exam
/// token), counts exact index matches per question id, computes
/// `score = round(100 * correct / total)` and the type-specific pass rule,
/// and records a TestResult for the authenticated user.
pub async fn submit_test(
    State(storage): State<Storage>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Path((test_type, test_id)): Path<(String, String)>,
    Json(req): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let questions = match test_type.as_str() {
        "bilet" => storage.get_questions_by_bilet(&test_id).await?,
        "topic" => storage.get_questions_by_topic(&test_id).await?,
        "real" => {
            let token = req
                .exam_token
                .as_deref()
                .ok_or_else(|| AppError::BadRequest("Missing exam token".to_string()))?;
            let ids = verify_exam_token(token, &config.jwt_secret)?;
            storage.get_questions_by_ids(&ids).await?
        }
        _ => return Err(AppError::BadRequest("Invalid test type".to_string())),
    };

    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No questions found for this test".to_string(),
        ));
    }

    let keys = answer_keys(&questions);
    let (correct_answers, total_questions, score) = score_answers(&keys, &req.answers);
    let passed = is_passed(&test_type, correct_answers, score);

    let result = storage
        .create_test_result(NewTestResult {
            user_id: claims.sub,
            test_type,
            test_id,
            score,
            total_questions,
            correct_answers,
            time_spent: req.time_spent,
            answers: req.answers,
            passed,
        })
        .await?;

    Ok(Json(SubmitTestResponse {
        id: result.id,
        score,
        total_questions,
        correct_answers,
        passed,
        time_spent: result.time_spent,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: i64) -> Vec<(String, i64)> {
        (0..n).map(|i| (format!("q{}", i), 0)).collect()
    }

    fn answers(correct: i64, total: i64) -> HashMap<String, i64> {
        // First `correct` answers hit index 0, the rest pick a wrong index.
        (0..total)
            .map(|i| (format!("q{}", i), if i < correct { 0 } else { 1 }))
            .collect()
    }

    #[test]
    fn perfect_score() {
        let (correct, total, score) = score_answers(&keys(20), &answers(20, 20));
        assert_eq!((correct, total, score), (20, 20, 100));
    }

    #[test]
    fn score_is_rounded_percentage() {
        let (correct, total, score) = score_answers(&keys(20), &answers(16, 20));
        assert_eq!((correct, total, score), (16, 20, 80));

        // 15/19 = 78.9... -> 79
        let (correct, _, score) = score_answers(&keys(19), &answers(15, 19));
        assert_eq!((correct, score), (15, 79));
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let (correct, total, score) = score_answers(&keys(4), &answers(2, 2));
        assert_eq!((correct, total, score), (2, 4, 50));
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let mut submitted = answers(2, 2);
        submitted.insert("bogus".to_string(), 0);
        let (correct, total, _) = score_answers(&keys(2), &submitted);
        assert_eq!((correct, total), (2, 2));
    }

    #[test]
    fn empty_key_set_scores_zero() {
        let (correct, total, score) = score_answers(&[], &answers(2, 2));
        assert_eq!((correct, total, score), (0, 0, 0));
    }

    #[test]
    fn real_test_passes_on_seventeen_correct() {
        // 17/20 = 85% either way, but the rule is the count.
        assert!(is_passed("real", 17, 85));
        assert!(!is_passed("real", 16, 80));
    }

    #[test]
    fn practice_tests_pass_at_eighty_percent() {
        assert!(is_passed("bilet", 16, 80));
        assert!(!is_passed("bilet", 15, 79));
        assert!(is_passed("topic", 4, 80));
        assert!(!is_passed("topic", 3, 79));
    }
}
