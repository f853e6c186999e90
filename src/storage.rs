// src/storage.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, types::Json};
use uuid::Uuid;

use crate::models::{
    bilet::{Bilet, NewBilet},
    question::{NewQuestion, Question},
    test_result::{NewTestResult, TestResult, UserStats},
    topic::{NewTopic, Topic},
    user::{NewUser, User},
};

/// Repository over the in-memory database; sole source of truth for all
/// entities. "Not found" is an explicit `None`, never an error.
///
/// The pool behind this is limited to a single connection, which keeps the
/// `sqlite::memory:` database alive for the process lifetime and serializes
/// access.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // User methods

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_user_by_phone(&self, phone: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = ?")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a user with a fresh id and creation timestamp. No phone
    /// format or password strength checks at this layer; the password is
    /// expected to arrive already hashed.
    pub async fn create_user(&self, new: NewUser) -> Result<User, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query("INSERT INTO users (id, name, phone, password, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&id)
            .bind(&new.name)
            .bind(&new.phone)
            .bind(&new.password)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id,
            name: new.name,
            phone: new.phone,
            password: new.password,
            created_at: now,
        })
    }

    pub async fn update_user_name(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query("UPDATE users SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_user(id).await
    }

    // Bilet methods

    pub async fn get_bilets(&self, limit: i64) -> Result<Vec<Bilet>, sqlx::Error> {
        sqlx::query_as::<_, Bilet>("SELECT * FROM bilets ORDER BY number ASC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_bilet(&self, id: &str) -> Result<Option<Bilet>, sqlx::Error> {
        sqlx::query_as::<_, Bilet>("SELECT * FROM bilets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_bilet(&self, new: NewBilet) -> Result<Bilet, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO bilets (
                id, number, title, title_uz, title_ru, title_uzc,
                description, description_uz, description_ru, description_uzc,
                question_count, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(new.number)
        .bind(&new.title)
        .bind(&new.title_uz)
        .bind(&new.title_ru)
        .bind(&new.title_uzc)
        .bind(&new.description)
        .bind(&new.description_uz)
        .bind(&new.description_ru)
        .bind(&new.description_uzc)
        .bind(new.question_count)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Bilet {
            id,
            number: new.number,
            title: new.title,
            title_uz: new.title_uz,
            title_ru: new.title_ru,
            title_uzc: new.title_uzc,
            description: new.description,
            description_uz: new.description_uz,
            description_ru: new.description_ru,
            description_uzc: new.description_uzc,
            question_count: new.question_count,
            created_at: now,
        })
    }

    // Topic methods

    pub async fn get_topics(&self, limit: i64) -> Result<Vec<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>("SELECT * FROM topics ORDER BY name ASC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_topic(&self, id: &str) -> Result<Option<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>("SELECT * FROM topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_topic(&self, new: NewTopic) -> Result<Topic, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO topics (
                id, name, name_uz, name_ru, name_uzc,
                description, description_uz, description_ru, description_uzc,
                question_count, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.name_uz)
        .bind(&new.name_ru)
        .bind(&new.name_uzc)
        .bind(&new.description)
        .bind(&new.description_uz)
        .bind(&new.description_ru)
        .bind(&new.description_uzc)
        .bind(new.question_count)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Topic {
            id,
            name: new.name,
            name_uz: new.name_uz,
            name_ru: new.name_ru,
            name_uzc: new.name_uzc,
            description: new.description,
            description_uz: new.description_uz,
            description_ru: new.description_ru,
            description_uzc: new.description_uzc,
            question_count: new.question_count,
            created_at: now,
        })
    }

    // Question methods

    pub async fn get_questions_by_bilet(
        &self,
        bilet_id: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE bilet_id = ? ORDER BY position ASC",
        )
        .bind(bilet_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_questions_by_topic(
        &self,
        topic_id: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE topic_id = ? ORDER BY position ASC",
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Uniform random sample of `count` questions.
    pub async fn get_random_questions(&self, count: i64) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>("SELECT * FROM questions ORDER BY RANDOM() LIMIT ?")
            .bind(count)
            .fetch_all(&self.pool)
            .await
    }

    /// Fetches the questions for a pinned id set (answer-key lookup on
    /// "real" submissions). Order follows the id list's storage order, not
    /// the input order; callers match answers by id.
    pub async fn get_questions_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<Question>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder =
            sqlx::QueryBuilder::<Sqlite>::new("SELECT * FROM questions WHERE id IN (");

        let mut separated = query_builder.separated(",");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        query_builder
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create_question(&self, new: NewQuestion) -> Result<Question, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO questions (
                id, bilet_id, topic_id, position,
                question_text, question_text_uz, question_text_ru, question_text_uzc,
                options, options_uz, options_ru, options_uzc,
                correct_answer,
                explanation, explanation_uz, explanation_ru, explanation_uzc,
                image_url, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new.bilet_id)
        .bind(&new.topic_id)
        .bind(new.position)
        .bind(&new.question_text)
        .bind(&new.question_text_uz)
        .bind(&new.question_text_ru)
        .bind(&new.question_text_uzc)
        .bind(Json(&new.options))
        .bind(Json(&new.options_uz))
        .bind(Json(&new.options_ru))
        .bind(Json(&new.options_uzc))
        .bind(new.correct_answer)
        .bind(&new.explanation)
        .bind(&new.explanation_uz)
        .bind(&new.explanation_ru)
        .bind(&new.explanation_uzc)
        .bind(&new.image_url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Question {
            id,
            bilet_id: new.bilet_id,
            topic_id: new.topic_id,
            position: new.position,
            question_text: new.question_text,
            question_text_uz: new.question_text_uz,
            question_text_ru: new.question_text_ru,
            question_text_uzc: new.question_text_uzc,
            options: Json(new.options),
            options_uz: Json(new.options_uz),
            options_ru: Json(new.options_ru),
            options_uzc: Json(new.options_uzc),
            correct_answer: new.correct_answer,
            explanation: new.explanation,
            explanation_uz: new.explanation_uz,
            explanation_ru: new.explanation_ru,
            explanation_uzc: new.explanation_uzc,
            image_url: new.image_url,
            created_at: now,
        })
    }

    // Test result methods

    /// Appends a result. No validation that the referenced user or test
    /// exists; results are insert-only.
    pub async fn create_test_result(
        &self,
        new: NewTestResult,
    ) -> Result<TestResult, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO test_results (
                id, user_id, test_type, test_id, score, total_questions,
                correct_answers, time_spent, answers, passed, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new.user_id)
        .bind(&new.test_type)
        .bind(&new.test_id)
        .bind(new.score)
        .bind(new.total_questions)
        .bind(new.correct_answers)
        .bind(new.time_spent)
        .bind(Json(&new.answers))
        .bind(new.passed)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(TestResult {
            id,
            user_id: new.user_id,
            test_type: new.test_type,
            test_id: new.test_id,
            score: new.score,
            total_questions: new.total_questions,
            correct_answers: new.correct_answers,
            time_spent: new.time_spent,
            answers: Json(new.answers),
            passed: new.passed,
            completed_at: now,
        })
    }

    pub async fn get_test_results(&self, user_id: &str) -> Result<Vec<TestResult>, sqlx::Error> {
        sqlx::query_as::<_, TestResult>(
            "SELECT * FROM test_results WHERE user_id = ? ORDER BY completed_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Derives aggregate statistics from the user's results. A user with no
    /// results gets all zeros.
    pub async fn get_user_stats(&self, user_id: &str) -> Result<UserStats, sqlx::Error> {
        let results = self.get_test_results(user_id).await?;

        let scores: Vec<i64> = results.iter().map(|r| r.score).collect();
        let dates: Vec<DateTime<Utc>> = results.iter().map(|r| r.completed_at).collect();

        Ok(UserStats {
            total_tests: results.len() as i64,
            average_score: average_score(&scores),
            study_streak: study_streak(&dates, Utc::now().date_naive()),
        })
    }
}

/// Arithmetic mean of scores, rounded half away from zero.
fn average_score(scores: &[i64]) -> i64 {
    if scores.is_empty() {
        return 0;
    }
    (scores.iter().sum::<i64>() as f64 / scores.len() as f64).round() as i64
}

/// Consecutive-day study streak.
///
/// Walks the distinct calendar dates (UTC, newest first) starting from
/// `today`; counts a date and advances the reference while the gap is 0 or
/// 1 days, stopping at the first larger gap. "Tested yesterday but not
/// today" still yields a non-zero streak.
fn study_streak(completed: &[DateTime<Utc>], today: NaiveDate) -> i64 {
    let mut dates: Vec<NaiveDate> = completed.iter().map(|t| t.date_naive()).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    let mut streak = 0;
    let mut current = today;

    for date in dates {
        let gap = (current - date).num_days();
        if (0..=1).contains(&gap) {
            streak += 1;
            current = date;
        } else {
            break;
        }
    }

    streak
}
