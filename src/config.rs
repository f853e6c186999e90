// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of randomly sampled questions in a "real" (exam simulation) test.
pub const REAL_TEST_QUESTION_COUNT: i64 = 20;

/// Minimum correct answers to pass a "real" test. The official exam allows
/// three mistakes out of twenty, so the threshold is a count, not a percentage.
pub const REAL_TEST_PASS_COUNT: i64 = 17;

/// Minimum score (0-100) to pass a bilet or topic test.
pub const PASSING_SCORE: i64 = 80;

/// Lifetime of the signed token pinning a served "real" question set.
/// The timed test runs 25 minutes; the extra slack covers slow submissions.
pub const EXAM_TOKEN_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        // The store is in-memory by design; the override exists for tests
        // and local experiments with a file-backed database.
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            port,
            static_dir,
        }
    }
}
