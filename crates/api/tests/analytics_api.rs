//! HTTP-level tests for the dashboard aggregates.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

#[tokio::test]
async fn metrics_over_mixed_portfolio() {
    let pool = dealpulse_db::create_pool();
    post_json(build_test_app(pool.clone()), "/api/v1/leads", json!({ "company_name": "Only Lead" })).await;
    for (name, value, stage) in [
        ("Open", 4_500_000, "qualified"),
        ("Won", 6_700_000, "won"),
        ("Lost", 1_000_000, "lost"),
    ] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/deals",
            json!({ "company_name": name, "value": value, "stage": stage }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(build_test_app(pool), "/api/v1/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!({
            "active_leads": 1,
            "pipeline_value": 112000,
            "win_rate": 33,
            "avg_deal_size": 67000
        })
    );
}

#[tokio::test]
async fn metrics_with_largest_allowed_deals_succeed() {
    let pool = dealpulse_db::create_pool();
    let max = dealpulse_core::validation::MAX_DEAL_VALUE_CENTS;
    for name in ["Big One", "Big Two"] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/deals",
            json!({ "company_name": name, "value": max, "stage": "won" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(build_test_app(pool), "/api/v1/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pipeline_value"], 2 * max / 100);
    assert_eq!(json["data"]["win_rate"], 100);
    assert_eq!(json["data"]["avg_deal_size"], max / 100);
}

#[tokio::test]
async fn metrics_on_empty_store_are_zero() {
    let json = body_json(get(build_test_app(dealpulse_db::create_pool()), "/api/v1/metrics").await).await;
    assert_eq!(json["data"]["pipeline_value"], 0);
    assert_eq!(json["data"]["win_rate"], 0);
    assert_eq!(json["data"]["avg_deal_size"], 0);
}

#[tokio::test]
async fn pipeline_summary_groups_active_stages() {
    let pool = dealpulse_db::create_seeded_pool().await;

    let json = body_json(get(build_test_app(pool), "/api/v1/pipeline-summary?top=1").await).await;
    let stages = json["data"].as_array().unwrap();

    let labels: Vec<&str> = stages.iter().map(|s| s["stage"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["qualified", "proposal", "negotiation", "closing"]);

    let proposal = &stages[1];
    assert_eq!(proposal["count"], 2);
    assert_eq!(proposal["total_value"], 19_200_000);
    assert_eq!(proposal["deals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn silent_deals_ranked_most_neglected_first() {
    let pool = dealpulse_db::create_seeded_pool().await;

    let json = body_json(get(build_test_app(pool), "/api/v1/silent-deals").await).await;
    let silent = json["data"].as_array().unwrap();

    let names: Vec<&str> = silent.iter().map(|d| d["company_name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["GlobalCo", "SmartCorp"]);
    assert_eq!(silent[0]["days_since_contact"], 6);
    assert_eq!(silent[1]["days_since_contact"], 5);
}

#[tokio::test]
async fn silent_deals_exclude_recent_contact() {
    let pool = dealpulse_db::create_pool();
    let long_ago = Utc::now() - Duration::days(12);
    for (name, contacted) in [("Fresh", Utc::now()), ("Stale", long_ago)] {
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/deals",
            json!({
                "company_name": name,
                "value": 100,
                "stage": "proposal",
                "last_contact_date": contacted
            }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool), "/api/v1/silent-deals").await).await;
    let silent = json["data"].as_array().unwrap();
    assert_eq!(silent.len(), 1);
    assert_eq!(silent[0]["company_name"], "Stale");
    assert_eq!(silent[0]["days_since_contact"], 12);
}

#[tokio::test]
async fn insight_cards_summarize_seeded_data() {
    let pool = dealpulse_db::create_seeded_pool().await;

    let json = body_json(get(build_test_app(pool), "/api/v1/insights").await).await;
    let cards = json["data"].as_array().unwrap();
    assert_eq!(cards.len(), 3);

    assert_eq!(cards[0]["kind"], "priority");
    assert_eq!(cards[0]["count"], 2);
    assert_eq!(
        cards[0]["description"],
        "2 deals haven't been contacted in 5+ days. GlobalCo, SmartCorp need immediate attention."
    );

    assert_eq!(cards[1]["kind"], "opportunity");
    assert_eq!(cards[1]["count"], 2);

    assert_eq!(cards[2]["kind"], "risk");
    assert_eq!(cards[2]["count"], 0);
}
