use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use chrono::NaiveDate;
use days_api::clock::FixedClock;
use days_api::metrics::ServerMetrics;
use days_api::{AppState, Config};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use telemetry::metrics::Telemetry;

fn build_test_server() -> TestServer {
    let now = NaiveDate::from_ymd_opt(2023, 10, 9)
        .unwrap()
        .and_hms_opt(12, 30, 15)
        .unwrap();
    let telemetry = Telemetry::new(Some(ServerMetrics::new(None).unwrap()));
    let state = AppState::new(
        Config::default(),
        Arc::new(FixedClock::new(now)),
        telemetry,
    );

    TestServer::new(days_api::build_router(state)).unwrap()
}

async fn history(server: &TestServer, number: &str) -> Vec<Value> {
    let response = server
        .get("/history")
        .add_query_param("number", number)
        .await;
    response.assert_status_ok();
    response.json()
}

fn routes(entries: &[Value]) -> Vec<&str> {
    entries
        .iter()
        .map(|entry| entry["route"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_index() {
    let server = build_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "Welcome to the Days API."}));
}

#[tokio::test]
async fn test_disallowed_methods() {
    let server = build_test_server();

    for (method, path) in [
        (Method::GET, "/between"),
        (Method::GET, "/weekday"),
        (Method::POST, "/history"),
        (Method::POST, "/current_age"),
        (Method::PUT, "/history"),
    ] {
        let response = server.method(method, path).await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}

#[tokio::test]
async fn test_unknown_path() {
    let server = build_test_server();

    let response = server.get("/nowhere").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(
        &json!({"error": "The requested endpoint does not exist"}),
    );
}

#[tokio::test]
async fn test_between_missing_data() {
    let server = build_test_server();

    for body in [
        json!({}),
        json!({"first": "12.01.2000"}),
        json!({"A": 1, "B": 2}),
    ] {
        let response = server.post("/between").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"error": "Missing required data."}));
    }
}

#[tokio::test]
async fn test_between_invalid_format() {
    let server = build_test_server();

    for body in [
        json!({"first": 1, "last": 2}),
        json!({"first": "red", "last": "blue"}),
        json!({"first": "23/1/1999", "last": "1999/2/16"}),
        json!({"first": "12.01.2000", "last": null}),
    ] {
        let response = server.post("/between").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(
            &json!({"error": "Unable to convert value to datetime."}),
        );
    }
}

#[tokio::test]
async fn test_between_days() {
    let server = build_test_server();

    let response = server
        .post("/between")
        .json(&json!({"first": "12.01.2000", "last": "14.01.2000"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"days": 2}));

    let response = server
        .post("/between")
        .json(&json!({"first": "12.01.2002", "last": "14.01.2001"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"days": -363}));
}

#[tokio::test]
async fn test_body_must_be_json() {
    let server = build_test_server();

    let response = server.post("/between").text("first=12.01.2000").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Expected request with `Content-Type: application/json`"
    }));

    let response = server.post("/weekday").json(&json!("09.10.2023")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Request body must be a JSON object")
    );

    // Neither request reached the history
    let entries = history(&server, "20").await;
    assert_eq!(routes(&entries), vec!["history"]);
}

#[tokio::test]
async fn test_weekday() {
    let server = build_test_server();

    let response = server
        .post("/weekday")
        .json(&json!({"date": "09.10.2023"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"weekday": "Monday"}));

    let response = server
        .post("/weekday")
        .json(&json!({"date": "01.01.2000"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"weekday": "Saturday"}));
}

#[tokio::test]
async fn test_weekday_errors() {
    let server = build_test_server();

    let response = server.post("/weekday").json(&json!({"day": 1})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Missing required data."}));

    let response = server
        .post("/weekday")
        .json(&json!({"date": "31.02.2013"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response
        .assert_json(&json!({"error": "Unable to convert value to datetime."}));
}

#[tokio::test]
async fn test_history_number_validation() {
    let server = build_test_server();

    for number in ["0", "24", "red", "-8", "13.5", ""] {
        let response = server
            .get("/history")
            .add_query_param("number", number)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "error": "Number must be an integer between 1 and 20."
        }));
    }

    for number in 1..=20 {
        // Each successful read adds one record before slicing
        let entries = history(&server, &number.to_string()).await;
        assert_eq!(entries.len(), number);
    }
}

#[tokio::test]
async fn test_history_tracks_requests_newest_first() {
    let server = build_test_server();

    server
        .post("/between")
        .json(&json!({"first": "12.01.2000", "last": "14.01.2000"}))
        .await
        .assert_status_ok();
    server
        .post("/weekday")
        .json(&json!({"date": "09.10.2023"}))
        .await
        .assert_status_ok();
    server
        .get("/current_age")
        .add_query_param("date", "2000-01-01")
        .await
        .assert_status_ok();

    let entries = history(&server, "5").await;

    assert_eq!(
        routes(&entries),
        vec!["history", "current_age", "weekday", "between"]
    );
    assert_eq!(
        entries[0],
        json!({"method": "GET", "at": "09/10/2023 12:30", "route": "history"})
    );
    assert_eq!(entries[3]["method"], "POST");
}

#[tokio::test]
async fn test_history_default_number_is_five() {
    let server = build_test_server();

    for _ in 0..7 {
        server
            .post("/weekday")
            .json(&json!({"date": "09.10.2023"}))
            .await
            .assert_status_ok();
    }

    let response = server.get("/history").await;
    response.assert_status_ok();
    let entries: Vec<Value> = response.json();

    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["route"], "history");
}

#[tokio::test]
async fn test_history_caps_at_twenty() {
    let server = build_test_server();

    for _ in 0..25 {
        server
            .post("/between")
            .json(&json!({"first": "01.01.2000", "last": "02.01.2000"}))
            .await
            .assert_status_ok();
    }

    let entries = history(&server, "20").await;

    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0]["route"], "history");
    assert!(entries[1..].iter().all(|entry| entry["route"] == "between"));
}

#[tokio::test]
async fn test_failed_requests_are_not_recorded() {
    let server = build_test_server();

    server
        .post("/between")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/current_age")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/history")
        .add_query_param("number", "0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let entries = history(&server, "20").await;

    assert_eq!(routes(&entries), vec!["history"]);
}

#[tokio::test]
async fn test_history_clear() {
    let server = build_test_server();

    server
        .post("/weekday")
        .json(&json!({"date": "09.10.2023"}))
        .await
        .assert_status_ok();

    let response = server.delete("/history").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "History cleared"}));

    // Clearing is not recorded; the read is the only entry.
    let entries = history(&server, "20").await;
    assert_eq!(routes(&entries), vec!["history"]);
}

#[tokio::test]
async fn test_current_age_errors() {
    let server = build_test_server();

    let response = server.get("/current_age").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Date parameter is required."}));

    let response =
        server.get("/current_age").add_query_param("date", "").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"error": "Date parameter is required."}));

    for date in ["09.10.2023", "tomorrow", "2023-13-01", "2023-02-30"] {
        let response = server
            .get("/current_age")
            .add_query_param("date", date)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "error": "Value for data parameter is invalid."
        }));
    }
}

#[tokio::test]
async fn test_current_age() {
    let server = build_test_server();

    for (date, age) in [
        ("2023-10-09", 0),
        ("20231009", 0),
        ("1990-01-01", 33),
        ("2021-W01-1", 2),
        ("2027-10-09", -4),
    ] {
        let response = server
            .get("/current_age")
            .add_query_param("date", date)
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"current_age": age}));
    }
}

#[tokio::test]
async fn test_health() {
    let server = build_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["history_log"]["status"], "healthy");
    assert_eq!(body["components"]["history_log"]["records"], 0);
}

#[tokio::test]
async fn test_version() {
    let server = build_test_server();

    let response = server.get("/version").await;

    response.assert_status_ok();
    assert_eq!(response.text(), days_api::VERSION.unwrap_or("unknown"));
}

#[tokio::test]
async fn test_metrics_count_served_and_failed_requests() {
    let server = build_test_server();

    server
        .post("/between")
        .json(&json!({"first": "12.01.2000", "last": "14.01.2000"}))
        .await
        .assert_status_ok();
    server
        .post("/between")
        .json(&json!({"first": "x", "last": "y"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();

    assert!(text.contains(r#"requests_served{route="between"} 1"#));
    let errors = text
        .lines()
        .find(|line| line.starts_with("request_errors{"))
        .unwrap();
    assert!(errors.contains(r#"error_code="invalid_format""#));
    assert!(errors.contains(r#"handler="between""#));
    assert!(errors.ends_with(" 1"));
    assert!(text.contains("history_records 1"));
    assert!(text.ends_with("# EOF\n"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_metrics_include_process_series() {
    let server = build_test_server();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("process_cpu_seconds_total"));
    assert!(text.contains("process_resident_memory_bytes"));
    assert!(text.contains("uptime_seconds"));
}

#[tokio::test]
async fn test_openapi_document() {
    let server = build_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["info"]["title"], "Days API");
    for path in ["/", "/between", "/weekday", "/history", "/current_age"] {
        assert!(body["paths"][path].is_object(), "missing {path}");
    }
    assert!(body["paths"]["/history"]["delete"].is_object());
}
