// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Access-token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - stores the user id.
    pub sub: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Claims for the short-lived token pinning a served "real" question set.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExamClaims {
    /// Ids of the questions that were served.
    pub qids: Vec<String>,
    pub exp: usize,
}

/// Claims injected by `optional_auth_middleware`; `None` when the request
/// carried no valid bearer token.
#[derive(Debug, Clone)]
pub struct OptionalClaims(pub Option<Claims>);

fn unix_now() -> Result<usize, AppError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize)
}

/// Signs an access token for the user.
pub fn sign_jwt(user_id: &str, secret: &str, expiration_seconds: u64) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id.to_owned(),
        exp: unix_now()? + expiration_seconds as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes an access token.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Signs an exam token carrying the served question ids.
pub fn sign_exam_token(
    question_ids: Vec<String>,
    secret: &str,
    ttl_seconds: u64,
) -> Result<String, AppError> {
    let claims = ExamClaims {
        qids: question_ids,
        exp: unix_now()? + ttl_seconds as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies an exam token and returns the pinned question ids.
/// A tampered or expired token is a client error, not an auth failure.
pub fn verify_exam_token(token: &str, secret: &str) -> Result<Vec<String>, AppError> {
    let token_data = decode::<ExamClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::BadRequest("Invalid or expired exam token".to_string()))?;

    Ok(token_data.claims.qids)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

/// Axum middleware: authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and injects
/// `Claims` into the request extensions; otherwise responds 401 with the
/// standard JSON error body.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    let claims = verify_jwt(token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Axum middleware: optional authentication.
///
/// Used by listing endpoints that annotate entries with the requesting
/// user's history when a valid token is present and fall back to
/// "no history" otherwise. Never rejects the request.
pub async fn optional_auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let claims = bearer_token(&req).and_then(|t| verify_jwt(t, &config.jwt_secret).ok());
    req.extensions_mut().insert(OptionalClaims(claims));

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn access_token_round_trip() {
        let token = sign_jwt("user-1", SECRET, 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn access_token_rejects_wrong_secret() {
        let token = sign_jwt("user-1", SECRET, 60).unwrap();
        assert!(verify_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn exam_token_round_trip() {
        let ids = vec!["q1".to_string(), "q2".to_string()];
        let token = sign_exam_token(ids.clone(), SECRET, 60).unwrap();
        assert_eq!(verify_exam_token(&token, SECRET).unwrap(), ids);
    }

    #[test]
    fn exam_token_is_not_an_access_token() {
        let token = sign_exam_token(vec!["q1".to_string()], SECRET, 60).unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());
    }
}
