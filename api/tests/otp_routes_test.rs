//! HTTP tests for the OTP routes

use actix_web::{http::header, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use co_api::app::create_app;
use co_api::routes::otp::AppState;
use co_core::repositories::{InMemoryConsultantRepository, InMemoryOtpRecordRepository};
use co_core::services::{
    ManualClock, OtpService, OtpServiceConfig, PasswordResetConfig, PasswordResetService,
};
use co_infra::messaging::MockMessagingGateway;
use co_shared::config::Environment;

type TestState =
    AppState<MockMessagingGateway, InMemoryOtpRecordRepository, InMemoryConsultantRepository>;

const MOBILE: &str = "9876543210";
const DESTINATION: &str = "919876543210";

struct Fixture {
    state: web::Data<TestState>,
    gateway: Arc<MockMessagingGateway>,
    consultants: Arc<InMemoryConsultantRepository>,
    clock: ManualClock,
}

/// Helper function to create test application state
fn fixture() -> Fixture {
    let gateway = Arc::new(MockMessagingGateway::new());
    let records = Arc::new(InMemoryOtpRecordRepository::new());
    let consultants = Arc::new(InMemoryConsultantRepository::new());
    let clock = ManualClock::new(Utc::now());

    let otp_service = Arc::new(OtpService::with_clock(
        gateway.clone(),
        records,
        Arc::new(clock.clone()),
        OtpServiceConfig::default(),
    ));
    let password_reset = Arc::new(PasswordResetService::new(
        otp_service.clone(),
        consultants.clone(),
        PasswordResetConfig {
            bcrypt_cost: 4,
            ..PasswordResetConfig::default()
        },
    ));

    Fixture {
        state: web::Data::new(AppState {
            otp_service,
            password_reset,
        }),
        gateway,
        consultants,
        clock,
    }
}

fn wrong_code(actual: &str) -> &'static str {
    if actual == "000000" {
        "111111"
    } else {
        "000000"
    }
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(create_app(
            $fixture.state.clone(),
            Environment::Development,
            4096,
        ))
        .await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

#[actix_web::test]
async fn test_request_otp_success() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["kind"], "fresh");
    assert_eq!(body["data"]["attempts"], 1);
    assert_eq!(body["data"]["resend_after_seconds"], 300);
    assert!(body.get("reason").is_none());

    let code = f.gateway.last_code(DESTINATION).unwrap();
    assert_eq!(code.len(), 6);
}

#[actix_web::test]
async fn test_request_otp_accepts_formatted_mobile() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(
        app,
        "/api/v1/otp/request",
        json!({ "mobile": "+91 98765-43210" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(f.gateway.last_code(DESTINATION).is_some());
}

#[actix_web::test]
async fn test_request_otp_invalid_mobile() {
    let f = fixture();
    let app = init_app!(f);

    for mobile in ["12345", "98765432101234567890123", "98765abcde"] {
        let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": mobile }));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "mobile {}", mobile);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"], "VALIDATION_ERROR");
    }
    assert_eq!(f.gateway.message_count(), 0);
}

#[actix_web::test]
async fn test_request_otp_cooldown() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::OK);

    f.clock.advance(Duration::seconds(100));
    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "200");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "COOLDOWN_ACTIVE");
    assert_eq!(body["retry_after_seconds"], 200);

    f.clock.advance(Duration::seconds(200));
    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["kind"], "resend");
    assert_eq!(body["data"]["attempts"], 1);
}

#[actix_web::test]
async fn test_request_otp_delivery_failure() {
    let f = fixture();
    f.gateway.set_simulate_failure(true);
    let app = init_app!(f);

    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "DELIVERY_FAILED");

    // Nothing was recorded, so verification has nothing to match
    let resp = post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": "123456" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_verify_otp_not_requested() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": "123456" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "NOT_REQUESTED");
}

#[actix_web::test]
async fn test_verify_otp_rejects_malformed_code() {
    let f = fixture();
    let app = init_app!(f);

    for code in ["12345", "12a456"] {
        let resp = post_json!(
            app,
            "/api/v1/otp/verify",
            json!({ "mobile": MOBILE, "code": code })
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "code {}", code);
    }
}

#[actix_web::test]
async fn test_request_then_verify_end_to_end() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    assert_eq!(resp.status(), StatusCode::OK);
    let code = f.gateway.last_code(DESTINATION).unwrap();

    let resp = post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": wrong_code(&code) })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "INVALID_CODE");

    let resp = post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": code })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["verified"], true);

    let resp = post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": code })
    );
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "ALREADY_VERIFIED");
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let f = fixture();
    f.consultants.register(MOBILE).await;
    let app = init_app!(f);

    post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    let code = f.gateway.last_code(DESTINATION).unwrap();

    // Not verified yet
    let resp = post_json!(
        app,
        "/api/v1/otp/password-reset",
        json!({ "mobile": MOBILE, "code": code, "new_password": "brand-new-pass" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "NOT_VERIFIED");

    post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": code })
    );

    let resp = post_json!(
        app,
        "/api/v1/otp/password-reset",
        json!({ "mobile": MOBILE, "code": code, "new_password": "brand-new-pass" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let hash = f.consultants.password_hash(MOBILE).await.unwrap();
    assert!(hash.starts_with("$2"));

    // The verification was consumed
    let resp = post_json!(
        app,
        "/api/v1/otp/password-reset",
        json!({ "mobile": MOBILE, "code": code, "new_password": "another-pass" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_password_reset_unknown_consultant() {
    let f = fixture();
    let app = init_app!(f);

    post_json!(app, "/api/v1/otp/request", json!({ "mobile": MOBILE }));
    let code = f.gateway.last_code(DESTINATION).unwrap();
    post_json!(
        app,
        "/api/v1/otp/verify",
        json!({ "mobile": MOBILE, "code": code })
    );

    let resp = post_json!(
        app,
        "/api/v1/otp/password-reset",
        json!({ "mobile": MOBILE, "code": code, "new_password": "brand-new-pass" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_password_reset_short_password() {
    let f = fixture();
    let app = init_app!(f);

    let resp = post_json!(
        app,
        "/api/v1/otp/password-reset",
        json!({ "mobile": MOBILE, "code": "123456", "new_password": "short" })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("new_password"));
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let f = fixture();
    let app = init_app!(f);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/request")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"mobile\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reason"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let f = fixture();
    let app = init_app!(f);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "consultly-api");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
