use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, LoginPayload, RegisterPayload, client_ip};
use crate::db::NewUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/register
/// Create an account. The display name is split into first/last on the
/// first space; the email is the unique identifier.
pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterPayload>>, ApiError> {
    let (Some(name), Some(email), Some(password)) =
        (payload.name, payload.email, payload.password)
    else {
        return Err(ApiError::validation(
            "Name, email, and password are required",
        ));
    };

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::validation(
            "Name, email, and password are required",
        ));
    }

    if state.store().user_email_exists(&email).await? {
        return Err(ApiError::conflict("Email already registered"));
    }

    let (first_name, last_name) = match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name, String::new()),
    };

    let security = state.config().read().await.security.clone();
    let user_id = state
        .store()
        .create_user(
            NewUser {
                first_name,
                last_name,
                email: email.clone(),
                password,
                phone: payload.phone,
            },
            &security,
        )
        .await?;

    if let Err(e) = state
        .store()
        .record_activity(
            Some(user_id),
            None,
            "user.registered",
            Some(email),
            client_ip(&headers),
        )
        .await
    {
        tracing::warn!("Failed to record registration activity: {e}");
    }

    Ok(Json(ApiResponse::success(RegisterPayload {
        message: "Registration successful! Please log in.".to_string(),
        user_id,
    })))
}

/// POST /api/login
/// Verify credentials and establish a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginPayload>>, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let is_valid = state
        .store()
        .verify_user_password(&email, &password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let user = state
        .store()
        .get_user_by_email(&email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if let Err(e) = session.insert("user_id", user.id).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    if let Err(e) = state
        .store()
        .record_activity(
            Some(user.id),
            None,
            "user.login",
            None,
            client_ip(&headers),
        )
        .await
    {
        tracing::warn!("Failed to record login activity: {e}");
    }

    Ok(Json(ApiResponse::success(LoginPayload {
        user: user.into(),
    })))
}

/// POST /api/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    Json(ApiResponse::success(super::MessagePayload::new(
        "Logged out",
    )))
}
