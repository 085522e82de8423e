// tests/api_tests.rs
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::time::Duration;

use bigo::api::handlers::WsBroker;
use bigo::api::{AppState, configure_routes};
use bigo::config::{AppConfig, OpenAiConfig};

// Points at a port nothing listens on, so dispatches fail at the transport
// layer without leaving the machine.
fn test_state() -> AppState {
    let config = AppConfig {
        openai: OpenAiConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
    };
    AppState::new(config, WsBroker::new())
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_rt::test]
async fn test_snapshot_starts_idle() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/analysis").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["celebrating"], false);
    assert!(body.get("result").is_none());
    assert!(body.get("error").is_none());
}

#[actix_rt::test]
async fn test_unreachable_endpoint_surfaces_transport_failure() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/analyze")
        .set_json(json!({
            "code": "for i in range(n): pass",
            "constraints": "1 <= n <= 10^5",
            "time_limit": "1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 202);

    // The dispatch resolves in the background; poll the snapshot.
    let mut last = Value::Null;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let req = test::TestRequest::get().uri("/api/v1/analysis").to_request();
        last = test::call_and_read_body_json(&app, req).await;
        if last["status"] == "failed" {
            break;
        }
    }
    assert_eq!(last["status"], "failed");
    assert_eq!(last["error"]["kind"], "transport");
    assert!(last.get("result").is_none());
}

#[actix_rt::test]
async fn test_reset_returns_session_to_idle() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/analyze")
        .set_json(json!({ "code": "x = 1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 202);

    let req = test::TestRequest::post()
        .uri("/api/v1/analysis/reset")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "idle");
}
