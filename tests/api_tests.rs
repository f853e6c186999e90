// tests/api_tests.rs

use avtotest::{config::Config, routes, state::AppState, storage::Storage};
use sqlx::sqlite::SqlitePoolOptions;

struct TestApp {
    address: String,
    #[allow(dead_code)]
    storage: Storage,
}

/// Spawns the app on a random port against a fresh in-memory database.
/// The random startup seed is skipped; tests insert their own data through
/// the storage handle.
async fn spawn_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database for testing");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        static_dir: "public".to_string(),
    };

    let storage = Storage::new(pool);
    let state = AppState {
        storage: storage.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, storage }
}

fn unique_phone() -> String {
    // 12 digits, locally unique
    let suffix: String = uuid::Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(9)
        .collect();
    format!("998{:0>9}", suffix)
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({
            "name": "Aziz",
            "phone": unique_phone(),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["name"], "Aziz");
    // The password never leaves the server, hashed or not.
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_phone() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let phone = unique_phone();

    let first = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "A", "phone": phone, "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    let second = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "B", "phone": phone, "password": "password456"}))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);

    let body: serde_json::Value = second.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn register_fails_validation() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Malformed phone
    let response = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "A", "phone": "not-a-phone", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Empty name
    let response = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "", "phone": unique_phone(), "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let phone = unique_phone();

    client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "Aziz", "phone": phone, "password": "password123"}))
        .send()
        .await
        .unwrap();

    let ok = client
        .post(&format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({"phone": phone, "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status().as_u16(), 200);
    let body: serde_json::Value = ok.json().await.unwrap();
    assert!(body["token"].as_str().is_some());

    let wrong_password = client
        .post(&format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({"phone": phone, "password": "nope1234"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_password.status().as_u16(), 401);

    let unknown_phone = client
        .post(&format!("{}/api/auth/login", app.address))
        .json(&serde_json::json!({"phone": unique_phone(), "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_phone.status().as_u16(), 401);
}

#[tokio::test]
async fn logout_acknowledges() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/auth/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn me_and_profile_update_persist() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let register: serde_json::Value = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "Aziz", "phone": unique_phone(), "password": "password123"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = register["token"].as_str().unwrap().to_string();

    let me: serde_json::Value = client
        .get(&format!("{}/api/auth/me", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["name"], "Aziz");

    let updated = client
        .put(&format!("{}/api/auth/profile", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"name": "Azizbek"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status().as_u16(), 200);

    // The change is written through to storage, not just echoed back.
    let me_again: serde_json::Value = client
        .get(&format!("{}/api/auth/me", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me_again["name"], "Azizbek");
}

#[tokio::test]
async fn profile_update_requires_name() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let register: serde_json::Value = client
        .post(&format!("{}/api/auth/register", app.address))
        .json(&serde_json::json!({"name": "Aziz", "phone": unique_phone(), "password": "password123"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = register["token"].as_str().unwrap();

    let response = client
        .put(&format!("{}/api/auth/profile", app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({"name": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn protected_routes_require_auth() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for path in [
        "/api/auth/me",
        "/api/results",
        "/api/stats",
    ] {
        let response = client
            .get(&format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401, "GET {} without token", path);

        let response = client
            .get(&format!("{}{}", app.address, path))
            .header("Authorization", "Bearer not-a-real-token")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401, "GET {} with bad token", path);
    }
}
