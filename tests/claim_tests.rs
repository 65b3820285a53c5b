use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

mod common;
use common::{get_request, json_request, register_user, report_lost_item, response_json, spawn_app};

#[tokio::test]
async fn claim_on_owned_item_notifies_the_owner_once() {
    let (state, app) = spawn_app().await;

    let owner_id = register_user(&app, "Owner One", "owner@example.com").await;
    let item_id = report_lost_item(&app, "Claimed Wallet", Some(owner_id)).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/claim"),
            serde_json::json!({
                "name": "Honest Finder",
                "email": "finder@example.com",
                "description": "I found this on the bus",
                "verification": "It has my initials inside",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let claim_id = i32::try_from(body["claim_id"].as_i64().unwrap()).unwrap();

    let claim = state.store().get_claim(claim_id).await.unwrap().unwrap();
    assert_eq!(claim.status, "pending");
    assert_eq!(claim.claimant_name, "Honest Finder");
    assert_eq!(claim.item_id, item_id);

    let notifications = state
        .store()
        .list_notifications_for_user(owner_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "claim");
    assert_eq!(notifications[0].title, "New Claim Received");
    assert_eq!(
        notifications[0].message,
        "Honest Finder has claimed your item: Claimed Wallet"
    );
    assert_eq!(notifications[0].item_id, Some(item_id));
}

#[tokio::test]
async fn claim_on_unowned_item_creates_no_notification() {
    let (state, app) = spawn_app().await;

    let bystander_id = register_user(&app, "By Stander", "bystander@example.com").await;
    let item_id = report_lost_item(&app, "Orphan Item", None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/claim"),
            serde_json::json!({ "email": "someone@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let claim_id = i32::try_from(body["claim_id"].as_i64().unwrap()).unwrap();

    // Defaults applied for omitted fields.
    let claim = state.store().get_claim(claim_id).await.unwrap().unwrap();
    assert_eq!(claim.claimant_name, "Anonymous");
    assert_eq!(claim.description, "");

    let notifications = state
        .store()
        .list_notifications_for_user(bystander_id)
        .await
        .unwrap();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn repeated_claims_are_stored_independently() {
    let (state, app) = spawn_app().await;

    let owner_id = register_user(&app, "Owner One", "owner@example.com").await;
    let item_id = report_lost_item(&app, "Popular Item", Some(owner_id)).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/items/{item_id}/claim"),
                serde_json::json!({
                    "name": "Same Claimant",
                    "email": "same@example.com",
                    "description": "still mine",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(state.store().claim_count_for_item(item_id).await.unwrap(), 2);

    let notifications = state
        .store()
        .list_notifications_for_user(owner_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
}

#[tokio::test]
async fn claim_on_missing_item_is_not_found() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items/777/claim",
            serde_json::json!({ "name": "Nobody" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_item_removes_claims_but_keeps_notifications() {
    let (state, app) = spawn_app().await;

    let owner_id = register_user(&app, "Owner One", "owner@example.com").await;
    let item_id = report_lost_item(&app, "Doomed Item", Some(owner_id)).await;

    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/claim"),
            serde_json::json!({
                "name": "Claimant",
                "email": "claimant@example.com",
                "description": "mine",
            }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/items/{item_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(state.store().claim_count_for_item(item_id).await.unwrap(), 0);
    assert!(state.store().get_item(item_id).await.unwrap().is_none());

    // The owner's notification survives with the item reference cleared.
    let notifications = state
        .store()
        .list_notifications_for_user(owner_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].item_id, None);
}

#[tokio::test]
async fn notifications_api_lists_and_marks_read() {
    let (state, app) = spawn_app().await;

    let owner_id = register_user(&app, "Owner One", "owner@example.com").await;
    let item_id = report_lost_item(&app, "Noisy Item", Some(owner_id)).await;

    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/claim"),
            serde_json::json!({ "name": "Claimant", "email": "c@example.com" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/notifications?user_id={owner_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "claim");
    assert_eq!(notifications[0]["read"], false);
    let notif_id = notifications[0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/notifications/{notif_id}/read"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/notifications?user_id={owner_id}")))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["notifications"][0]["read"], true);

    assert_eq!(
        state
            .store()
            .unread_notification_count(owner_id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn messages_are_addressed_to_the_listing_contact() {
    let (_, app) = spawn_app().await;

    let item_id = report_lost_item(&app, "Messaged Item", None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/message"),
            serde_json::json!({
                "senderName": "Curious Passerby",
                "senderEmail": "passerby@example.com",
                "subject": "Saw something similar",
                "message": "Was it near the east exit?",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["message_id"].as_i64().unwrap() > 0);

    // The listing contact (from report_lost_item) is a@b.com.
    let response = app
        .clone()
        .oneshot(get_request("/api/messages?email=a@b.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender_email"], "passerby@example.com");
    assert_eq!(messages[0]["item_id"], item_id);
}

#[tokio::test]
async fn message_requires_sender_email_and_body() {
    let (_, app) = spawn_app().await;

    let item_id = report_lost_item(&app, "Quiet Item", None).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/items/{item_id}/message"),
            serde_json::json!({ "senderName": "No Email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
