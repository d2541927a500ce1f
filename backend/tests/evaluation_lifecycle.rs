//! Evaluation lifecycle across the 24 hour edit window.

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use chrono::TimeDelta;
use serde_json::json;

mod support;

use support::{ADMIN_EMAIL, ADMIN_PASSWORD, Harness, bearer, login, send};

#[actix_web::test]
async fn evaluation_locks_after_edit_window() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let created = send(
        &app,
        bearer(TestRequest::post().uri("/api/evaluations"), &token)
            .set_json(json!({"guard_id": "GRD001", "client_id": "CL-1"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let data = &created.body["data"];
    assert_eq!(data["kpiScores"], json!({}));
    assert_eq!(data["totalScore"], json!("0.00"));
    assert_eq!(data["remarks"], json!(null));
    assert_eq!(data["editableUntil"], json!("2024-06-04T09:00:00Z"));
    let id = data["id"].as_i64().expect("id");
    let uri = format!("/api/evaluations/{id}");

    harness.clock.advance(TimeDelta::hours(2));
    let updated = send(
        &app,
        bearer(TestRequest::put().uri(&uri), &token).set_json(json!({
            "kpi_scores": {"punctuality": 5, "appearance": 4},
            "total_score": 88.456,
            "remarks": "Solid shift"
        })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["totalScore"], json!("88.46"));
    assert_eq!(updated.body["data"]["remarks"], json!("Solid shift"));
    assert_eq!(updated.body["data"]["updatedAt"], json!("2024-06-03T11:00:00Z"));

    let partial = send(
        &app,
        bearer(TestRequest::put().uri(&uri), &token).set_json(json!({"remarks": null})),
    )
    .await;
    assert_eq!(partial.status, StatusCode::OK);
    assert_eq!(partial.body["data"]["remarks"], json!("Solid shift"));
    assert_eq!(partial.body["data"]["kpiScores"]["punctuality"], json!(5));

    harness.clock.advance(TimeDelta::hours(23));
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let locked = send(
        &app,
        bearer(TestRequest::put().uri(&uri), &token).set_json(json!({"total_score": 10})),
    )
    .await;
    assert_eq!(locked.status, StatusCode::FORBIDDEN);
    assert_eq!(locked.body["code"], json!("edit_window_expired"));
    assert_eq!(
        locked.body["message"],
        json!("Evaluation is no longer editable")
    );

    let unchanged = send(&app, bearer(TestRequest::get().uri(&uri), &token)).await;
    assert_eq!(unchanged.body["data"]["totalScore"], json!("88.46"));

    let deleted = send(&app, bearer(TestRequest::delete().uri(&uri), &token)).await;
    assert_eq!(
        deleted.body,
        json!({"success": true, "message": "Evaluation deleted successfully"})
    );
    let gone = send(&app, bearer(TestRequest::get().uri(&uri), &token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn edit_window_bound_is_exclusive() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let created = send(
        &app,
        bearer(TestRequest::post().uri("/api/evaluations"), &token)
            .set_json(json!({"guard_id": "GRD001", "client_id": "CL-1"})),
    )
    .await;
    let uri = format!(
        "/api/evaluations/{}",
        created.body["data"]["id"].as_i64().expect("id")
    );

    harness
        .clock
        .advance(TimeDelta::hours(24) - TimeDelta::seconds(1));
    let last_second = send(
        &app,
        bearer(TestRequest::put().uri(&uri), &token).set_json(json!({"remarks": "late"})),
    )
    .await;
    assert_eq!(last_second.status, StatusCode::OK);

    harness.clock.advance(TimeDelta::seconds(1));
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let at_bound = send(
        &app,
        bearer(TestRequest::put().uri(&uri), &token).set_json(json!({"remarks": "too late"})),
    )
    .await;
    assert_eq!(at_bound.status, StatusCode::FORBIDDEN);
    assert_eq!(at_bound.body["code"], json!("edit_window_expired"));
}

#[actix_web::test]
async fn list_filters_newest_first() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    for (guard, client) in [("GRD001", "CL-1"), ("GRD002", "CL-1"), ("GRD001", "CL-2")] {
        harness.clock.advance(TimeDelta::minutes(1));
        let reply = send(
            &app,
            bearer(TestRequest::post().uri("/api/evaluations"), &token)
                .set_json(json!({"guard_id": guard, "client_id": client})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    let ids = |body: &serde_json::Value| -> Vec<i64> {
        body["data"]
            .as_array()
            .expect("array")
            .iter()
            .map(|e| e["id"].as_i64().expect("id"))
            .collect()
    };

    let all = send(&app, bearer(TestRequest::get().uri("/api/evaluations"), &token)).await;
    assert_eq!(ids(&all.body), vec![3, 2, 1]);

    let by_guard = send(
        &app,
        bearer(
            TestRequest::get().uri("/api/evaluations?guard_id=GRD001"),
            &token,
        ),
    )
    .await;
    assert_eq!(ids(&by_guard.body), vec![3, 1]);

    let both = send(
        &app,
        bearer(
            TestRequest::get().uri("/api/evaluations?guard_id=GRD001&client_id=CL-1"),
            &token,
        ),
    )
    .await;
    assert_eq!(ids(&both.body), vec![1]);

    let none = send(
        &app,
        bearer(
            TestRequest::get().uri("/api/evaluations?client_id=CL-9"),
            &token,
        ),
    )
    .await;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.body["data"], json!([]));
}

#[actix_web::test]
async fn missing_evaluation_is_not_found_for_update_and_delete() {
    let harness = Harness::with_admin().await;
    let app = harness.app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let update = send(
        &app,
        bearer(TestRequest::put().uri("/api/evaluations/42"), &token)
            .set_json(json!({"remarks": "x"})),
    )
    .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
    assert_eq!(update.body["message"], json!("Evaluation not found"));

    let delete = send(
        &app,
        bearer(TestRequest::delete().uri("/api/evaluations/42"), &token),
    )
    .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}
