mod common;

use axum::http::StatusCode;
use casting_backend::routes::api_router;
use serde_json::json;
use uuid::Uuid;

use common::{register_verified, send_json, test_state};

#[tokio::test]
async fn hiring_request_lifecycle() {
    let Some(state) = test_state().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = api_router(state.clone());

    let hirer = register_verified(&app, &state, "hirers").await;
    let talent_b = register_verified(&app, &state, "talents").await;
    let talent_c = register_verified(&app, &state, "talents").await;

    // Hirer sends a request to talent B.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": talent_b.id, "message": "Audition next week" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], "Pending");
    let request_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    // Duplicate for the same pair conflicts while one exists.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": talent_b.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Talent B sees it with the hirer's display fields attached.
    let (status, body) = send_json(&app, "GET", "/api/hiring/talent", Some(&talent_b.token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == request_id.to_string())
        .expect("request listed");
    assert_eq!(listed["hirer"]["id"], hirer.id.to_string());
    assert_eq!(listed["hirer"]["name"], "Test User");

    // Neither another talent nor the originating hirer may transition it.
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent_c.token),
        Some(json!({ "request_id": request_id, "status": "Accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&hirer.token),
        Some(json!({ "request_id": request_id, "status": "Accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Pending is not a valid transition target.
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent_b.token),
        Some(json!({ "request_id": request_id, "status": "Pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Talent B accepts; the row persists as Accepted.
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent_b.token),
        Some(json!({ "request_id": request_id, "status": "Accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["request"]["status"], "Accepted");

    let (status, body) = send_json(&app, "GET", "/api/hiring/hirer", Some(&hirer.token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let listed = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == request_id.to_string())
        .expect("request listed for hirer");
    assert_eq!(listed["status"], "Accepted");
    assert_eq!(listed["talent"]["id"], talent_b.id.to_string());
}

#[tokio::test]
async fn rejection_deletes_and_reopens_the_pair() {
    let Some(state) = test_state().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = api_router(state.clone());

    let hirer = register_verified(&app, &state, "hirers").await;
    let talent = register_verified(&app, &state, "talents").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": talent.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let request_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent.token),
        Some(json!({ "request_id": request_id, "status": "Rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The row is gone, not marked.
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent.token),
        Some(json!({ "request_id": request_id, "status": "Accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // And the pair can be requested again.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": talent.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn send_request_kind_and_existence_checks() {
    let Some(state) = test_state().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = api_router(state.clone());

    let hirer = register_verified(&app, &state, "hirers").await;
    let talent = register_verified(&app, &state, "talents").await;

    // Talents cannot send requests.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&talent.token),
        Some(json!({ "talent_id": talent.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The target must exist and be a talent; a hirer id does not count.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": hirer.id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn all_talents_masks_contact_until_connected() {
    let Some(state) = test_state().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = api_router(state.clone());

    let hirer = register_verified(&app, &state, "hirers").await;
    let talent = register_verified(&app, &state, "talents").await;

    // Complete the talent's profile directly; the listing only shows
    // profiles passing the completeness filter.
    sqlx::query(
        r#"
        UPDATE principals
        SET age = 25, height = '170cm', weight = '60kg', body_type = 'Slim',
            skin_tone = 'Fair', language = 'English', skills = 'Dancing',
            about_yourself = 'Stage actor',
            images = '{"front":{"url":"/uploads/f.jpg","id":"f"},"left":{"url":"/uploads/l.jpg","id":"l"},"right":{"url":"/uploads/r.jpg","id":"r"}}',
            video = '{"url":"/uploads/v.mp4","id":"v"}'
        WHERE id = $1
        "#,
    )
    .bind(talent.id)
    .execute(&state.pool)
    .await
    .expect("complete profile");

    // Talents may not browse the listing.
    let (status, _) = send_json(&app, "GET", "/api/talents/all-talents", Some(&talent.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send_json(&app, "GET", "/api/talents/all-talents", Some(&hirer.token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let card = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == talent.id.to_string())
        .expect("talent listed");
    assert_eq!(card["email"], "");
    assert_eq!(card["phone"], "");

    // Connect via an accepted request; contact info appears.
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/hiring/send",
        Some(&hirer.token),
        Some(json!({ "talent_id": talent.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let request_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/hiring/status",
        Some(&talent.token),
        Some(json!({ "request_id": request_id, "status": "Accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, "GET", "/api/talents/all-talents", Some(&hirer.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let card = body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == talent.id.to_string())
        .expect("talent listed");
    assert_eq!(card["email"], talent.email);
    assert_eq!(card["phone"], "555-0100");
}
