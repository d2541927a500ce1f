//! Guard registry over the full HTTP stack.

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use chrono::TimeDelta;
use serde_json::json;

mod support;

use support::{ADMIN_EMAIL, ADMIN_PASSWORD, Harness, bearer, login, send};

#[actix_web::test]
async fn guard_crud_round() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let created = send(
        &app,
        bearer(TestRequest::post().uri("/api/guards"), &token)
            .set_json(json!({"name": "Alice Smith", "guard_id": "GRD001"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_i64().expect("id");

    harness.clock.advance(TimeDelta::minutes(1));
    let second = send(
        &app,
        bearer(TestRequest::post().uri("/api/guards"), &token)
            .set_json(json!({"name": "Bob Jones", "guard_id": "GRD002"})),
    )
    .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let listed = send(&app, bearer(TestRequest::get().uri("/api/guards"), &token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let codes: Vec<_> = listed.body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|guard| guard["guard_id"].clone())
        .collect();
    assert_eq!(codes, vec![json!("GRD002"), json!("GRD001")]);

    let fetched = send(
        &app,
        bearer(TestRequest::get().uri(&format!("/api/guards/{id}")), &token),
    )
    .await;
    assert_eq!(fetched.body["data"]["name"], json!("Alice Smith"));

    let deleted = send(
        &app,
        bearer(TestRequest::delete().uri(&format!("/api/guards/{id}")), &token),
    )
    .await;
    assert_eq!(
        deleted.body,
        json!({"success": true, "message": "Guard deleted successfully"})
    );

    let gone = send(
        &app,
        bearer(TestRequest::get().uri(&format!("/api/guards/{id}")), &token),
    )
    .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], json!("Guard not found"));

    let deleted_again = send(
        &app,
        bearer(TestRequest::delete().uri(&format!("/api/guards/{id}")), &token),
    )
    .await;
    assert_eq!(deleted_again.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_guard_code_conflicts() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let first = send(
        &app,
        bearer(TestRequest::post().uri("/api/guards"), &token)
            .set_json(json!({"name": "Alice Smith", "guard_id": "GRD001"})),
    )
    .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(
        &app,
        bearer(TestRequest::post().uri("/api/guards"), &token)
            .set_json(json!({"name": "Someone Else", "guard_id": "GRD001"})),
    )
    .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["code"], json!("conflict"));
    assert_eq!(
        second.body["message"],
        json!("A guard with this ID already exists")
    );
}

#[actix_web::test]
async fn malformed_ids_and_bodies_are_bad_requests() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let bad_id = send(&app, bearer(TestRequest::get().uri("/api/guards/abc"), &token)).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["details"]["code"], json!("invalid_id"));

    let bad_body = send(
        &app,
        bearer(TestRequest::post().uri("/api/guards"), &token)
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;
    assert_eq!(bad_body.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_body.body["success"], json!(false));
    assert_eq!(bad_body.body["details"]["code"], json!("malformed_body"));
}
