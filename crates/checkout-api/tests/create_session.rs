//! Router-level tests for POST /api/stripe/create-session.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use checkout_api::{create_router, AppConfig, AppState, CREATE_SESSION_PATH};
use checkout_core::{
    CheckoutError, CheckoutResult, CheckoutSettings, ProviderSession, SessionParams,
    SessionProvider,
};
use checkout_stripe::{StripeCheckoutProvider, StripeConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

enum Behaviour {
    Succeed,
    SucceedWithoutUrl,
    Fail(&'static str),
}

struct MockProvider {
    behaviour: Behaviour,
    calls: Mutex<Vec<SessionParams>>,
}

impl MockProvider {
    fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<SessionParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionProvider for MockProvider {
    async fn create_session(&self, params: &SessionParams) -> CheckoutResult<ProviderSession> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(params.clone());
            calls.len()
        };
        match self.behaviour {
            Behaviour::Succeed => Ok(ProviderSession::new(
                format!("cs_test_{n}"),
                format!("https://checkout.stripe.com/c/pay/cs_test_{n}"),
            )),
            Behaviour::SucceedWithoutUrl => Ok(ProviderSession {
                id: format!("cs_test_{n}"),
                url: None,
                expires_at: None,
            }),
            Behaviour::Fail(message) => Err(CheckoutError::ProviderError {
                provider: "mock".into(),
                message: message.into(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        site_url: "https://shop.example.in".to_string(),
        environment: "test".to_string(),
        settings_path: None,
    }
}

fn app_with(provider: Arc<MockProvider>) -> Router {
    let state = AppState::with_provider(test_config(), CheckoutSettings::default(), provider);
    create_router(state)
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(CREATE_SESSION_PATH)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_book_checkout() {
    let provider = MockProvider::new(Behaviour::Succeed);
    let app = app_with(provider.clone());

    let body = json!({
        "items": [{ "name": "Book", "price": 499, "quantity": 2 }],
        "customerEmail": "reader@example.in"
    });
    let (status, json) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "cs_test_1");
    assert_eq!(json["url"], "https://checkout.stripe.com/c/pay/cs_test_1");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    let item = &calls[0].line_items[0];
    assert_eq!(item.currency, "inr");
    assert_eq!(item.unit_amount, 49900);
    assert_eq!(item.quantity, 2);
    assert_eq!(calls[0].customer_email.as_deref(), Some("reader@example.in"));
    assert_eq!(calls[0].cancel_url, "https://shop.example.in/cart");
}

#[tokio::test]
async fn test_fractional_paise_round_half_up() {
    let provider = MockProvider::new(Behaviour::Succeed);
    let app = app_with(provider.clone());

    let body = json!({ "items": [{ "name": "Tea", "price": 499.995 }] });
    let (status, _) = post_json(app, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls()[0].line_items[0].unit_amount, 50000);
}

#[tokio::test]
async fn test_empty_items_is_bad_request() {
    for body in [r#"{"items":[]}"#, "{}", r#"{"items":null}"#] {
        let provider = MockProvider::new(Behaviour::Succeed);
        let (status, json) = post_json(app_with(provider.clone()), body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, json!({ "error": "No items provided" }));
        assert!(provider.calls().is_empty());
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let provider = MockProvider::new(Behaviour::Succeed);

    let (status, json) = post_json(app_with(provider.clone()), "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));

    let body = json!({ "items": [{ "name": "Book", "price": "cheap" }] });
    let (status, _) = post_json(app_with(provider.clone()), body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_zero_quantity_rejected_zero_price_allowed() {
    let provider = MockProvider::new(Behaviour::Succeed);

    let body = json!({ "items": [{ "name": "Book", "price": 10, "quantity": 0 }] });
    let (status, json) = post_json(app_with(provider.clone()), body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid quantity for 'Book': must be at least 1");

    let body = json!({ "items": [{ "name": "Sticker", "price": 0 }] });
    let (status, _) = post_json(app_with(provider.clone()), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].line_items[0].unit_amount, 0);
}

#[tokio::test]
async fn test_provider_failure_is_server_error_and_service_survives() {
    let provider = MockProvider::new(Behaviour::Fail("Invalid API Key provided"));
    let app = app_with(provider.clone());
    let body = json!({ "items": [{ "name": "Book", "price": 499 }] }).to_string();

    let (status, json) = post_json(app.clone(), body.clone()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "Invalid API Key provided" }));

    let (status, _) = post_json(app, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn test_blank_provider_message_falls_back() {
    let provider = MockProvider::new(Behaviour::Fail(""));
    let body = json!({ "items": [{ "name": "Book", "price": 499 }] }).to_string();

    let (status, json) = post_json(app_with(provider), body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Server error");
}

#[tokio::test]
async fn test_session_without_url_returns_null_url() {
    let provider = MockProvider::new(Behaviour::SucceedWithoutUrl);
    let body = json!({ "items": [{ "name": "Book", "price": 499 }] }).to_string();

    let (status, json) = post_json(app_with(provider), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "id": "cs_test_1", "url": null }));
}

#[tokio::test]
async fn test_retries_create_distinct_sessions() {
    let provider = MockProvider::new(Behaviour::Succeed);
    let app = app_with(provider.clone());
    let body = json!({ "items": [{ "name": "Book", "price": 499 }] }).to_string();

    let (_, first) = post_json(app.clone(), body.clone()).await;
    let (_, second) = post_json(app, body).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn test_health() {
    let app = app_with(MockProvider::new(Behaviour::Succeed));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["provider"], "mock");
}

#[tokio::test]
async fn test_success_page_shows_session() {
    let app = app_with(MockProvider::new(Behaviour::Succeed));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/order/success?session_id=cs_test_a1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("cs_test_a1"));
}

#[tokio::test]
async fn test_end_to_end_with_mocked_stripe() {
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("success_url=https%3A%2F%2Fshop.example.in%2Forder%2Fsuccess%3Fsession_id%3D%7BCHECKOUT_SESSION_ID%7D"))
        .and(body_string_contains("cancel_url=https%3A%2F%2Fshop.example.in%2Fcart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_e2e",
            "url": "https://checkout.stripe.com/c/pay/cs_test_e2e"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stripe = StripeCheckoutProvider::new(
        StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri()),
    )
    .unwrap();
    let state = AppState::with_provider(test_config(), CheckoutSettings::default(), Arc::new(stripe));

    let body = json!({ "items": [{ "name": "Book", "price": 499, "quantity": 2 }] });
    let (status, json) = post_json(create_router(state), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "cs_test_e2e");
    assert_eq!(json["url"], "https://checkout.stripe.com/c/pay/cs_test_e2e");
}
