#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use exercise_tracker::db::{create_memory_pool, DbPool};
use exercise_tracker::handlers::{exercises, health, logs, users};
use exercise_tracker::migrations::run_migrations_for_tests;
use exercise_tracker::models::{Exercise, User};
use exercise_tracker::repositories::{ExerciseRepository, UserRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let health_state = health::HealthState { pool: pool.clone() };
    let user_repo = UserRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool);

    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        user_repo: user_repo.clone(),
        exercise_repo: exercise_repo.clone(),
    };
    let logs_state = logs::LogsState {
        user_repo,
        exercise_repo,
    };

    exercise_tracker::routes::create_router(
        health_state,
        users_state,
        exercises_state,
        logs_state,
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/views")),
    )
}

pub async fn create_test_user(pool: &DbPool, username: &str) -> User {
    UserRepository::new(pool.clone())
        .create(username)
        .await
        .unwrap()
}

pub async fn create_test_exercise(
    pool: &DbPool,
    user_id: &str,
    description: &str,
    duration: f64,
    date: &str,
) -> Exercise {
    let date = exercise_tracker::models::calendar::parse_date(date).unwrap();
    ExerciseRepository::new(pool.clone())
        .create(user_id, description, duration, date)
        .await
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send a request and return the status with the raw body text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// Send a request that must succeed and parse its JSON body.
pub async fn send_json(app: Router, request: Request<Body>) -> Value {
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", body);
    serde_json::from_str(&body).unwrap()
}
