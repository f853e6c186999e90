// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{
        LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest, UserResponse,
    },
    storage::Storage,
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new user.
///
/// Hashes the password with Argon2 before storing it and signs a token so
/// the client is logged in immediately. Returns 201 Created.
pub async fn register(
    State(storage): State<Storage>,
    State(config): State<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if storage.get_user_by_phone(&payload.phone).await?.is_some() {
        return Err(AppError::Conflict(
            "User with this phone number already exists".to_string(),
        ));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = storage
        .create_user(NewUser {
            name: payload.name,
            phone: payload.phone,
            password: hashed_password,
        })
        .await?;

    let token = sign_jwt(&user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "user": UserResponse::from(&user),
        })),
    ))
}

/// Authenticates a user and returns a bearer token.
///
/// A wrong phone and a wrong password produce the same 401 so credentials
/// cannot be probed.
pub async fn login(
    State(storage): State<Storage>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = storage
        .get_user_by_phone(&payload.phone)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sign_jwt(&user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": UserResponse::from(&user),
    })))
}

/// Bearer tokens are stateless; logout just acknowledges so the client
/// discards its copy.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

/// Returns the authenticated user.
pub async fn me(
    State(storage): State<Storage>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = storage
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Updates the authenticated user's name and persists the change.
pub async fn update_profile(
    State(storage): State<Storage>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = storage
        .update_user_name(&claims.sub, &payload.name)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(&user)))
}
