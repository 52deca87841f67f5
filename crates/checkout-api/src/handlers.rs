//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use checkout_core::{CheckoutError, CheckoutRequest, ErrorBody, SessionResponse};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorBody>);

fn checkout_error_to_response(err: CheckoutError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::new(err.public_message())))
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cart-checkout",
        "provider": state.broker.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session from a cart.
///
/// 200 `{ id, url }`, 400 `{ error }` for bad carts, 500 `{ error }` when the
/// provider call fails.
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, ApiError> {
    let request = CheckoutRequest::from_json(&body).map_err(|e| {
        warn!("Malformed checkout request: {}", e);
        checkout_error_to_response(e)
    })?;

    info!(
        "Creating checkout: {} items, email={}",
        request.items.len(),
        request.customer_email().is_some()
    );

    let session = state
        .broker
        .create_session(&request)
        .await
        .map_err(|e| {
            if e.is_client_error() {
                warn!("Rejected checkout request: {}", e);
            }
            checkout_error_to_response(e)
        })?;

    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

fn display_session_id(session_id: Option<&str>) -> &str {
    match session_id {
        Some(id) if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => id,
        _ => "unknown",
    }
}

/// Order success landing page
pub async fn order_success(Query(params): Query<SuccessQuery>) -> impl IntoResponse {
    let session_id = display_session_id(params.session_id.as_deref());
    Html(format!(r#"
<!DOCTYPE html>
<html>
<head><title>Order Confirmed</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: #eef2ff;">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>Thank you for your order!</h1>
        <p>Session: <code>{}</code></p>
        <p style="color: #666;">A receipt will be sent to your email.</p>
    </div>
</body>
</html>
"#, session_id))
}
