#![allow(dead_code)]

use actix_web::http::Method;
use actix_web::test;
use hrleave::auth::jwt::generate_access_token;
use hrleave::config::Config;
use hrleave::db::ensure_schema;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        rate_protected_per_min: 60_000,
        api_prefix: String::new(),
    }
}

/// Single-connection in-memory pool: every query and transaction sees the
/// same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    ensure_schema(&pool).await.expect("schema bootstrap");
    seed(&pool).await;

    pool
}

async fn seed(pool: &SqlitePool) {
    for (id, full_name) in [("E1", "Erin One"), ("E2", "Evan Two")] {
        sqlx::query("INSERT INTO employees (id, full_name) VALUES (?, ?)")
            .bind(id)
            .bind(full_name)
            .execute(pool)
            .await
            .expect("seed employee");
    }

    let users: [(&str, &str, i64, Option<&str>); 4] = [
        ("U-ADMIN", "admin", 1, None),
        ("U-HR", "hr", 2, None),
        ("U-E1", "erin", 3, Some("E1")),
        ("U-E2", "evan", 3, Some("E2")),
    ];
    for (id, username, role_id, employee_id) in users {
        sqlx::query("INSERT INTO users (id, username, role_id, employee_id) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(username)
            .bind(role_id)
            .bind(employee_id)
            .execute(pool)
            .await
            .expect("seed user");
    }
}

/// Arrange-side shortcut: provision a leave type without going through the
/// API under test.
pub async fn seed_type(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO leave_types (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .expect("seed leave type")
        .last_insert_rowid()
}

pub async fn seed_balance(
    pool: &SqlitePool,
    employee_id: &str,
    leave_type_id: i64,
    year: i64,
    entitled_days: f64,
) -> i64 {
    sqlx::query(
        "INSERT INTO leave_balances (employee_id, leave_type_id, year, entitled_days) VALUES (?, ?, ?, ?)",
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .bind(entitled_days)
    .execute(pool)
    .await
    .expect("seed balance")
    .last_insert_rowid()
}

pub async fn used_days(pool: &SqlitePool, employee_id: &str, leave_type_id: i64, year: i64) -> f64 {
    sqlx::query_scalar(
        "SELECT used_days FROM leave_balances WHERE employee_id = ? AND leave_type_id = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .fetch_one(pool)
    .await
    .expect("balance row")
}

pub fn hr_token(cfg: &Config) -> String {
    token(cfg, "U-HR", 2, None)
}

pub fn admin_token(cfg: &Config) -> String {
    token(cfg, "U-ADMIN", 1, None)
}

pub fn employee_token(cfg: &Config, user_id: &str, employee_id: &str) -> String {
    token(cfg, user_id, 3, Some(employee_id))
}

pub fn token(cfg: &Config, user_id: &str, role: u8, employee_id: Option<&str>) -> String {
    generate_access_token(
        user_id,
        user_id,
        role,
        employee_id.map(str::to_string),
        &cfg.jwt_secret,
        cfg.access_token_ttl,
    )
}

/// Authenticated request builder. The peer address feeds the rate limiter's
/// key extractor.
pub fn authed(method: Method, uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .peer_addr("127.0.0.1:9000".parse().unwrap())
}

pub fn get(uri: &str, token: &str) -> test::TestRequest {
    authed(Method::GET, uri, token)
}

pub fn post(uri: &str, token: &str) -> test::TestRequest {
    authed(Method::POST, uri, token)
}

pub fn put(uri: &str, token: &str) -> test::TestRequest {
    authed(Method::PUT, uri, token)
}

pub fn patch(uri: &str, token: &str) -> test::TestRequest {
    authed(Method::PATCH, uri, token)
}

pub fn delete(uri: &str, token: &str) -> test::TestRequest {
    authed(Method::DELETE, uri, token)
}
