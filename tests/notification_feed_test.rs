mod common;

use axum::http::StatusCode;
use casting_backend::routes::api_router;
use serde_json::json;
use uuid::Uuid;

use common::{register_verified, send_json, test_state};

#[tokio::test]
async fn global_and_user_feeds() {
    let Some(state) = test_state().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = api_router(state.clone());

    let hirer = register_verified(&app, &state, "hirers").await;
    let talent = register_verified(&app, &state, "talents").await;

    // Empty payloads are refused on both send routes.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/notifications/all",
        Some(&hirer.token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let marker = format!("broadcast-{}", Uuid::new_v4());
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/notifications/all",
        Some(&hirer.token),
        Some(json!({ "title": marker, "body": "Open auditions" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["title"], marker);
    assert_eq!(body["status"], "No status");

    // The global feed is public and newest-first.
    let (status, body) = send_json(&app, "GET", "/api/notifications/global", None, None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let feed = body.as_array().unwrap();
    assert_eq!(feed[0]["title"], marker);

    // Target the talent; without a user_id the sender targets itself.
    let targeted = format!("direct-{}", Uuid::new_v4());
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/notifications/user",
        Some(&hirer.token),
        Some(json!({ "title": targeted, "user_id": talent.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Unknown target is a 404.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/notifications/user",
        Some(&hirer.token),
        Some(json!({ "title": "x", "user_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The talent's feed carries both the targeted and the global entry.
    let (status, body) = send_json(&app, "GET", "/api/notifications/user", Some(&talent.token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["title"].as_str())
        .collect();
    assert!(titles.contains(&targeted.as_str()));
    assert!(titles.contains(&marker.as_str()));

    // The hirer's feed does not see the talent-targeted entry.
    let (status, body) = send_json(&app, "GET", "/api/notifications/user", Some(&hirer.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["title"].as_str())
        .collect();
    assert!(!titles.contains(&targeted.as_str()));
}
