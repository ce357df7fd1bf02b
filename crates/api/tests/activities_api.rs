//! HTTP-level tests for the activity feed and call notes.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn log_activity_returns_201() {
    let pool = dealpulse_db::create_pool();
    let body = json!({
        "deal_id": 3,
        "type": "meeting",
        "description": "On-site tasting",
        "outcome": "Loved the granola"
    });

    let response = post_json(build_test_app(pool), "/api/v1/activities", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "meeting");
    assert_eq!(json["data"]["deal_id"], 3);
    assert!(json["data"]["lead_id"].is_null());
}

#[tokio::test]
async fn activity_requires_description() {
    let pool = dealpulse_db::create_pool();
    let body = json!({ "type": "note", "description": "" });

    let response = post_json(build_test_app(pool), "/api/v1/activities", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "description must not be empty");
}

#[tokio::test]
async fn activity_feed_filters_by_deal_and_lead() {
    let pool = dealpulse_db::create_seeded_pool().await;

    let all = body_json(get(build_test_app(pool.clone()), "/api/v1/activities").await).await;
    assert_eq!(ids(&all), vec![1, 2, 3]);

    let by_deal = body_json(get(build_test_app(pool.clone()), "/api/v1/activities?deal_id=2").await).await;
    assert_eq!(ids(&by_deal), vec![2]);

    let by_lead = body_json(get(build_test_app(pool.clone()), "/api/v1/activities?lead_id=3").await).await;
    assert_eq!(ids(&by_lead), vec![3]);

    let both = body_json(
        get(build_test_app(pool), "/api/v1/activities?deal_id=1&lead_id=2").await,
    )
    .await;
    assert!(ids(&both).is_empty());
}

// ---------------------------------------------------------------------------
// Call notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_call_note_with_defaults() {
    let pool = dealpulse_db::create_pool();
    let body = json!({
        "deal_id": 1,
        "call_duration": 25,
        "summary": "Walked through pricing tiers",
        "sentiment": "positive"
    });

    let response = post_json(build_test_app(pool.clone()), "/api/v1/call-notes", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let note = &json["data"];
    assert_eq!(note["summary"], "Walked through pricing tiers");
    assert_eq!(note["sentiment"], "positive");
    assert_eq!(note["key_points"], json!([]));
    assert_eq!(note["objections"], json!([]));

    let listed = body_json(get(build_test_app(pool), "/api/v1/call-notes?deal_id=1").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn call_note_rejects_negative_duration() {
    let pool = dealpulse_db::create_pool();
    let body = json!({ "summary": "Quick sync", "call_duration": -3 });

    let response = post_json(build_test_app(pool), "/api/v1/call-notes", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn call_notes_list_newest_first() {
    let pool = dealpulse_db::create_pool();
    for summary in ["first", "second"] {
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/call-notes",
            json!({ "lead_id": 4, "summary": summary }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/call-notes?lead_id=4").await).await;
    let summaries: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["summary"].as_str().unwrap())
        .collect();
    assert_eq!(summaries, vec!["second", "first"]);

    let other = body_json(get(build_test_app(pool), "/api/v1/call-notes?lead_id=5").await).await;
    assert!(other["data"].as_array().unwrap().is_empty());
}
