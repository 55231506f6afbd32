mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{spawn_app, TestApp};
use serde_json::{json, Value};

async fn add_progress(app: &TestApp, token: &str, goal_id: &str, body: Value) -> (StatusCode, Value) {
    app.request(
        Method::POST,
        &format!("/api/goals/{}/updates", goal_id),
        Some(token),
        Some(body),
    )
    .await
}

async fn wait_for_unread(app: &TestApp, token: &str, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..50 {
        let (_, body) = app
            .request(Method::GET, "/api/notifications/unread-count", Some(token), None)
            .await;
        count = body["count"].as_i64().unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    count
}

#[tokio::test]
async fn progress_completes_goal_and_notifies() {
    let app = spawn_app().await;
    let token = app.register("ana@example.com").await;
    let goal = app.create_goal(&token, 500.0).await;
    let goal_id = goal["id"].as_str().unwrap();
    assert_eq!(goal["isCompleted"], false);
    assert_eq!(goal["currentValue"], 0.0);

    let (status, body) = add_progress(&app, &token, goal_id, json!({ "amount": 200 })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["goal"]["currentValue"], 200.0);
    assert_eq!(body["goal"]["progressPercent"], 40);
    assert_eq!(body["update"]["amount"], 200.0);
    assert_eq!(body["update"]["goalId"], goal_id);

    let (status, body) = add_progress(
        &app,
        &token,
        goal_id,
        json!({
            "amount": 300,
            "note": "bonus",
            "proofUrl": "https://cdn.example.com/receipt.pdf",
            "proofType": "document",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["goal"]["isCompleted"], true);
    assert_eq!(body["goal"]["isSurpassed"], false);
    assert!(body["goal"]["completedAt"].is_string());
    assert_eq!(body["update"]["proofType"], "document");
    assert_eq!(body["update"]["note"], "bonus");

    assert_eq!(wait_for_unread(&app, &token, 1).await, 1);
    let (_, notifications) = app
        .request(Method::GET, "/api/notifications", Some(&token), None)
        .await;
    assert_eq!(notifications[0]["type"], "goal_completed");
    assert_eq!(notifications[0]["data"]["goalId"], goal_id);

    let (status, body) = add_progress(&app, &token, goal_id, json!({ "amount": 50 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["goal"]["currentValue"], 550.0);
    assert_eq!(body["goal"]["isSurpassed"], true);
    assert_eq!(wait_for_unread(&app, &token, 2).await, 2);

    let (status, detail) = app
        .request(Method::GET, &format!("/api/goals/{}", goal_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updates = detail["updates"].as_array().unwrap();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0]["amount"], 50.0);

    let (status, body) = app
        .request(Method::PUT, "/api/notifications/read-all", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);
    assert_eq!(wait_for_unread(&app, &token, 0).await, 0);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let app = spawn_app().await;
    let token = app.register("bo@example.com").await;
    let goal = app.create_goal(&token, 100.0).await;
    let goal_id = goal["id"].as_str().unwrap();

    for amount in [json!(0), json!(-5)] {
        let (status, body) = add_progress(&app, &token, goal_id, json!({ "amount": amount })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    let (status, body) = add_progress(&app, &token, goal_id, json!({ "note": "no amount" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, updates) = app
        .request(
            Method::GET,
            &format!("/api/goals/{}/updates", goal_id),
            Some(&token),
            None,
        )
        .await;
    assert!(updates.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn other_users_goal_is_not_found() {
    let app = spawn_app().await;
    let owner = app.register("owner@example.com").await;
    let intruder = app.register("intruder@example.com").await;
    let goal = app.create_goal(&owner, 100.0).await;
    let goal_id = goal["id"].as_str().unwrap();

    let (status, _) = add_progress(&app, &intruder, goal_id, json!({ "amount": 10 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(Method::GET, &format!("/api/goals/{}", goal_id), Some(&intruder), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/goals/{}", goal_id),
            Some(&intruder),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = add_progress(&app, &owner, "no-such-goal", json!({ "amount": 10 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .request(Method::GET, "/api/goals", Some(&intruder), None)
        .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn goal_management_endpoints() {
    let app = spawn_app().await;
    let token = app.register("cy@example.com").await;
    let goal = app.create_goal(&token, 10.0).await;
    let goal_id = goal["id"].as_str().unwrap().to_string();
    app.create_goal(&token, 20.0).await;

    let (status, edited) = app
        .request(
            Method::PUT,
            &format!("/api/goals/{}", goal_id),
            Some(&token),
            Some(json!({ "title": "Rainy day fund", "targetValue": 12 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{edited}");
    assert_eq!(edited["title"], "Rainy day fund");
    assert_eq!(edited["targetValue"], 12.0);

    add_progress(&app, &token, &goal_id, json!({ "amount": 12 })).await;

    let (_, completed) = app
        .request(Method::GET, "/api/goals?status=completed", Some(&token), None)
        .await;
    assert_eq!(completed.as_array().unwrap().len(), 1);
    let (_, active) = app
        .request(Method::GET, "/api/goals?status=active", Some(&token), None)
        .await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    let (status, _) = app
        .request(Method::GET, "/api/goals?status=done", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, summary) = app
        .request(Method::GET, "/api/goals/summary", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["completionRate"], 50);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/goals",
            Some(&token),
            Some(json!({ "title": " ", "targetValue": 1, "unit": "km", "endDate": "2099-01-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/goals/{}", goal_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .request(Method::GET, &format!("/api/goals/{}", goal_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;
    let (status, body) = app
        .request(Method::GET, "/api/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/goals/{id}/updates"].is_object());
}
