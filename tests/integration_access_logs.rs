mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{body_json, create_access_log, empty_request, setup_test_app};
use sqlx::PgPool;
use tower::ServiceExt;

async fn seed_logs(pool: &PgPool) {
    let at = |day: u32, hour: u32| Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap();

    let mut tx = pool.begin().await.unwrap();
    create_access_log(&mut tx, "123456", "Seecs Lab 1", "allowed", at(1, 8)).await;
    create_access_log(&mut tx, "123456", "Seecs Lab 1", "denied", at(1, 23)).await;
    create_access_log(&mut tx, "123456", "Nls Staff Room", "denied", at(2, 0)).await;
    create_access_log(&mut tx, "1234567", "Seecs Class 3", "allowed", at(3, 12)).await;
    create_access_log(&mut tx, "654321", "SEECS LAB 2", "allowed", at(15, 9)).await;
    tx.commit().await.unwrap();
}

fn rooms(body: &serde_json::Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["room_name"].as_str().unwrap())
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_logs_newest_first(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(
        rooms(&body),
        vec![
            "SEECS LAB 2",
            "Seecs Class 3",
            "Nls Staff Room",
            "Seecs Lab 1",
            "Seecs Lab 1"
        ]
    );

    let newest = &body["data"][0];
    assert_eq!(newest["user_id"], "654321");
    assert_eq!(newest["access_status"], "allowed");
    assert!(newest["timestamp"].as_str().unwrap().starts_with("2025-03-15T09:00:00"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_id_filter_is_exact(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs?user_id=123456"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 3);
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|log| log["user_id"] == "123456")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_room_filter_is_case_insensitive_substring(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs?room_name=seecs%20lab"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(rooms(&body), vec!["SEECS LAB 2", "Seecs Lab 1", "Seecs Lab 1"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_date_range_is_inclusive(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/access-logs?start_date=2025-03-01&end_date=2025-03-01",
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 2);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/access-logs?start_date=2025-03-02&end_date=2025-03-03&user_id=123456",
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(rooms(&body), vec!["Nls Staff Room"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_date_is_bad_request(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs?start_date=03/01/2025"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_logs_pagination(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs?limit=2&offset=2"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(rooms(&body), vec!["Nls Staff Room", "Seecs Lab 1"]);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["has_more"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_analytics_daily(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/access-logs/analytics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["time_frame"], "daily");
    assert_eq!(body["total"], 5);
    assert_eq!(
        body["status_counts"],
        serde_json::json!([
            { "status": "allowed", "count": 3 },
            { "status": "denied", "count": 2 }
        ])
    );

    let dates: Vec<&str> = body["time_series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2025-03-01", "2025-03-02", "2025-03-03", "2025-03-15"]
    );
    assert_eq!(body["time_series"][0]["count"], 2);
    assert_eq!(body["time_series"][0]["granted"], 1);
    assert_eq!(body["time_series"][0]["denied"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_analytics_monthly_with_filter(pool: PgPool) {
    seed_logs(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/access-logs/analytics?time_frame=monthly&user_id=123456",
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["time_frame"], "monthly");
    assert_eq!(body["total"], 3);
    assert_eq!(body["time_series"].as_array().unwrap().len(), 1);
    assert_eq!(body["time_series"][0]["date"], "2025-3");

    let rooms: Vec<&str> = body["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["room_name"].as_str().unwrap())
        .collect();
    assert_eq!(rooms, vec!["Nls Staff Room", "Seecs Lab 1"]);
    assert_eq!(body["rooms"][1]["granted"], 1);
    assert_eq!(body["rooms"][1]["denied"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_analytics_empty(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/access-logs/analytics?time_frame=weekly",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["status_counts"], serde_json::json!([]));
    assert_eq!(body["time_series"], serde_json::json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_analytics_unknown_time_frame(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/access-logs/analytics?time_frame=hourly",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
