//! Shared helpers for integration tests.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use findit::config::Config;
use http_body_util::BodyExt;
use std::sync::Arc;

pub async fn spawn_app() -> (Arc<findit::api::AppState>, Router) {
    let db_path = std::env::temp_dir().join(format!("findit-test-{}.db", uuid::Uuid::new_v4()));
    let uploads_path =
        std::env::temp_dir().join(format!("findit-test-uploads-{}", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.uploads_path = uploads_path.display().to_string();
    config.server.secure_cookies = false;

    let state = findit::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = findit::api::router(state.clone()).await;
    (state, router)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("response body was not JSON")
}

pub const BOUNDARY: &str = "findit-test-boundary";

/// Build a multipart/form-data body out of plain text fields and an
/// optional file part named `itemImage`.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"itemImage\"; filename=\"{filename}\"\r\nContent-Type: {}\r\n\r\n",
                mime::IMAGE_PNG
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Register a user and return its id.
pub async fn register_user(app: &Router, name: &str, email: &str) -> i32 {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            serde_json::json!({
                "name": name,
                "email": email,
                "password": "secret-password",
            }),
        ))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["success"], true, "registration failed: {body}");
    i32::try_from(body["user_id"].as_i64().unwrap()).unwrap()
}

/// Report a lost item owned by `user_id` and return the item id.
pub async fn report_lost_item(app: &Router, title: &str, user_id: Option<i32>) -> i32 {
    use tower::ServiceExt;

    let user_id_string;
    let mut fields = vec![
        ("itemName", title),
        ("category", "accessories"),
        ("description", "black leather"),
        ("location", "Main St"),
        ("dateLost", "2024-01-01"),
        ("contactInfo", "a@b.com"),
    ];
    if let Some(id) = user_id {
        user_id_string = id.to_string();
        fields.push(("user_id", user_id_string.as_str()));
    }

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/report-lost",
            multipart_body(&fields, None),
        ))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["success"], true, "report failed: {body}");
    i32::try_from(body["item_id"].as_i64().unwrap()).unwrap()
}
