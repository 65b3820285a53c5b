use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

mod common;
use common::{
    get_request, multipart_body, multipart_request, register_user, report_lost_item,
    response_json, spawn_app,
};

#[tokio::test]
async fn report_lost_stores_item_with_lost_status() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/report-lost",
            multipart_body(
                &[
                    ("itemName", "Wallet"),
                    ("category", "accessories"),
                    ("description", "black leather"),
                    ("location", "Main St"),
                    ("dateLost", "2024-01-01"),
                    ("contactInfo", "a@b.com"),
                ],
                None,
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let item_id = i32::try_from(body["item_id"].as_i64().unwrap()).unwrap();

    let item = state.store().get_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.status, "lost");
    assert_eq!(item.posted_by, "a");
    assert_eq!(item.contact, "a@b.com");
    assert_eq!(item.views, 0);
}

#[tokio::test]
async fn report_found_stores_item_with_found_status() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/report-found",
            multipart_body(
                &[
                    ("itemName", "Keys"),
                    ("category", "other"),
                    ("description", "bundle of keys with a red fob"),
                    ("location", "Library"),
                    ("dateFound", "2024-03-10"),
                    ("timeFound", "16:20"),
                    ("contactInfo", "finder@example.com"),
                    ("currentLocation", "Front desk"),
                ],
                None,
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let item_id = i32::try_from(body["item_id"].as_i64().unwrap()).unwrap();

    let item = state.store().get_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.status, "found");
    assert_eq!(item.current_location.as_deref(), Some("Front desk"));
    assert_eq!(item.time.as_deref(), Some("16:20"));
    assert_eq!(item.posted_by, "finder");
}

#[tokio::test]
async fn report_lost_names_first_missing_field() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/report-lost",
            multipart_body(
                &[
                    ("itemName", "Wallet"),
                    ("category", "accessories"),
                    // description omitted
                    ("location", "Main St"),
                    ("dateLost", "2024-01-01"),
                    ("contactInfo", "a@b.com"),
                ],
                None,
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Missing required field: description");
}

#[tokio::test]
async fn report_lost_persists_uploaded_image() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/report-lost",
            multipart_body(
                &[
                    ("itemName", "Camera"),
                    ("category", "electronics"),
                    ("description", "silver compact camera"),
                    ("location", "Pier 4"),
                    ("dateLost", "2024-05-20"),
                    ("contactInfo", "cam@b.com"),
                ],
                Some(("camera.png", b"not really a png")),
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let item_id = i32::try_from(body["item_id"].as_i64().unwrap()).unwrap();

    let item = state.store().get_item(item_id).await.unwrap().unwrap();
    let image_path = item.image_path.expect("image path should be stored");
    assert!(image_path.ends_with("_camera.png"));

    let on_disk = state.upload_service().uploads_path().join(&image_path);
    let contents = tokio::fs::read(&on_disk).await.unwrap();
    assert_eq!(contents, b"not really a png");
}

#[tokio::test]
async fn list_filters_combine_and_search_is_case_insensitive() {
    let (_, app) = spawn_app().await;

    report_lost_item(&app, "Black Wallet", None).await;
    report_lost_item(&app, "Umbrella", None).await;

    // A found item that also matches the search term.
    app.clone()
        .oneshot(multipart_request(
            "/api/report-found",
            multipart_body(
                &[
                    ("itemName", "Brown wallet"),
                    ("category", "accessories"),
                    ("description", "found near the fountain"),
                    ("location", "Park"),
                    ("dateFound", "2024-01-02"),
                    ("contactInfo", "f@b.com"),
                ],
                None,
            ),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/api/items?status=lost&search=wallet"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["title"], "Black Wallet");
    assert_eq!(body["items"][0]["status"], "lost");

    // No filters: everything, newest first.
    let response = app.clone().oneshot(get_request("/api/items")).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["items"][0]["title"], "Brown wallet");
}

#[tokio::test]
async fn list_filters_by_owner() {
    let (_, app) = spawn_app().await;

    let user_id = register_user(&app, "Owner One", "owner@example.com").await;
    report_lost_item(&app, "Owned Item", Some(user_id)).await;
    report_lost_item(&app, "Unowned Item", None).await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/items?user_id={user_id}")))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["title"], "Owned Item");
}

#[tokio::test]
async fn viewing_an_item_counts_every_read() {
    let (state, app) = spawn_app().await;

    let item_id = report_lost_item(&app, "Watched Item", None).await;

    for expected in 1..=3 {
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/items/{item_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["item"]["views"], expected);
    }

    let item = state.store().get_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.views, 3);
}

#[tokio::test]
async fn missing_item_is_not_found() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/items/9999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn recover_is_unconditional() {
    let (state, app) = spawn_app().await;

    let item_id = report_lost_item(&app, "Comeback Item", None).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/items/{item_id}/recover"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let item = state.store().get_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.status, "recovered");
}

#[tokio::test]
async fn delete_missing_item_is_not_found() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/items/1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
