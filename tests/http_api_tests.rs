//! End-to-end tests for the REST surface.
//!
//! Each test spins up the real router over a fresh in-memory database on
//! an ephemeral port and talks to it with a plain HTTP client, so status
//! codes, field names, and error bodies are checked exactly as a
//! front-end would see them.

use pointlog::db::Database;
use pointlog::server::{AppState, build_router};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn spawn() -> Self {
        let db = Database::open_in_memory().expect("in-memory database");
        let app = build_router(AppState::new(db));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn api_prefix_serves_the_same_surface() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .get(server.url("/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn custom_task_create_list_delete_cycle() {
    let server = TestServer::spawn().await;

    let created: Value = server
        .client
        .post(server.url("/custom-tasks"))
        .json(&json!({ "name": "Read Book", "score": 10 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["name"], "Read Book");
    assert_eq!(created["score"], 10);
    let id = created["id"].as_i64().unwrap();

    let listed: Vec<Value> = server
        .client
        .get(server.url("/custom-tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let deleted = server
        .client
        .delete(server.url(&format!("/custom-tasks/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await.unwrap();
    assert!(body["message"].as_str().is_some());

    let listed: Vec<Value> = server
        .client
        .get(server.url("/custom-tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn create_custom_task_without_name_is_bad_request() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/custom-tasks"))
        .json(&json!({ "score": 10 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn create_custom_task_without_score_is_bad_request() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/custom-tasks"))
        .json(&json!({ "name": "Read" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "score is required");
}

#[tokio::test]
async fn zero_score_is_accepted() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/custom-tasks"))
        .json(&json!({ "name": "Show up", "score": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_unknown_custom_task_is_not_found() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .delete(server.url("/custom-tasks/9999"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let server = TestServer::spawn().await;

    for (name, score) in [("Read Book", 10), ("Workout", 5)] {
        server
            .client
            .post(server.url("/custom-tasks"))
            .json(&json!({ "name": name, "score": score }))
            .send()
            .await
            .unwrap();
    }

    let results: Vec<Value> = server
        .client
        .get(server.url("/custom-tasks/search?q=read"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Read Book");
}

#[tokio::test]
async fn empty_search_returns_everything() {
    let server = TestServer::spawn().await;

    server
        .client
        .post(server.url("/custom-tasks"))
        .json(&json!({ "name": "Read", "score": 10 }))
        .send()
        .await
        .unwrap();

    let results: Vec<Value> = server
        .client
        .get(server.url("/custom-tasks/search"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn frequency_listing_orders_by_usage() {
    let server = TestServer::spawn().await;

    for name in ["Read", "Run"] {
        server
            .client
            .post(server.url("/custom-tasks"))
            .json(&json!({ "name": name, "score": 5 }))
            .send()
            .await
            .unwrap();
    }
    for (name, count) in [("Read", 3), ("Run", 1)] {
        for _ in 0..count {
            server
                .client
                .post(server.url("/daily-tasks"))
                .json(&json!({
                    "name": name,
                    "score": 5,
                    "date": "2026-08-01",
                    "timestamp": "09:00"
                }))
                .send()
                .await
                .unwrap();
        }
    }

    let ranked: Vec<Value> = server
        .client
        .get(server.url("/custom-tasks/frequency?sort=frequency"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(ranked[0]["name"], "Read");
    assert_eq!(ranked[0]["usage_count"], 3);
    assert_eq!(ranked[1]["name"], "Run");
    assert_eq!(ranked[1]["usage_count"], 1);
}

#[tokio::test]
async fn daily_tasks_filter_by_date() {
    let server = TestServer::spawn().await;

    for (name, date) in [("Read", "2026-08-01"), ("Run", "2026-08-02")] {
        server
            .client
            .post(server.url("/daily-tasks"))
            .json(&json!({ "name": name, "score": 5, "date": date, "timestamp": "09:00" }))
            .send()
            .await
            .unwrap();
    }

    let on_date: Vec<Value> = server
        .client
        .get(server.url("/daily-tasks?date=2026-08-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0]["name"], "Read");

    let all: Vec<Value> = server
        .client
        .get(server.url("/daily-tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn daily_task_missing_field_is_bad_request() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/daily-tasks"))
        .json(&json!({ "name": "Read", "score": 5, "date": "2026-08-01" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "timestamp is required");
}

#[tokio::test]
async fn daily_task_malformed_date_is_bad_request() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .post(server.url("/daily-tasks"))
        .json(&json!({
            "name": "Read",
            "score": 5,
            "date": "August 1st",
            "timestamp": "09:00"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_uses_camel_case_field_names() {
    let server = TestServer::spawn().await;

    for (score, date) in [(10, "2026-08-01"), (10, "2026-08-02"), (5, "2026-08-03"), (5, "2026-08-04")] {
        server
            .client
            .post(server.url("/daily-tasks"))
            .json(&json!({ "name": "task", "score": score, "date": date, "timestamp": "09:00" }))
            .send()
            .await
            .unwrap();
    }

    let stats: Value = server
        .client
        .get(server.url("/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["totalScore"], 30);
    assert_eq!(stats["totalTasks"], 4);
    assert_eq!(stats["uniqueDays"], 4);
    assert_eq!(stats["avgScorePerDay"], 8);
}

#[tokio::test]
async fn stats_on_empty_database_are_zero() {
    let server = TestServer::spawn().await;

    let stats: Value = server
        .client
        .get(server.url("/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["avgScorePerDay"], 0);
    assert_eq!(stats["uniqueDays"], 0);
}

#[tokio::test]
async fn trend_defaults_to_seven_days_and_returns_array() {
    let server = TestServer::spawn().await;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    for score in [5, 10] {
        server
            .client
            .post(server.url("/daily-tasks"))
            .json(&json!({ "name": "task", "score": score, "date": today, "timestamp": "09:00" }))
            .send()
            .await
            .unwrap();
    }

    let trend: Vec<Value> = server
        .client
        .get(server.url("/trend"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0]["date"], today.as_str());
    assert_eq!(trend[0]["score"], 15);
}

#[tokio::test]
async fn trend_clamps_absurd_windows() {
    let server = TestServer::spawn().await;

    // Both out-of-range values are clamped rather than rejected.
    for days in ["0", "100000"] {
        let response = server
            .client
            .get(server.url(&format!("/trend?days={days}")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn preferences_round_trip() {
    let server = TestServer::spawn().await;

    let defaults: Value = server
        .client
        .get(server.url("/preferences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(defaults["theme"], "light");
    assert_eq!(defaults["trend_window_days"], 7);

    let updated: Value = server
        .client
        .put(server.url("/preferences"))
        .json(&json!({
            "theme": "dark",
            "trend_window_days": 30,
            "custom_task_sort": "frequency"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["theme"], "dark");

    let reread: Value = server
        .client
        .get(server.url("/preferences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reread["theme"], "dark");
    assert_eq!(reread["trend_window_days"], 30);
}
