mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, test_app, test_app_with, test_config, MockWetro, VALID_KEY};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = test_app(MockWetro::new());

    let res = send(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "ok");
    assert!(res.body["data"]["timestamp"].is_string());

    let res = send(&app, Method::GET, "/", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["name"], "Wetrocloud Playground");
    Ok(())
}

#[tokio::test]
async fn check_auth_reflects_the_key_cookie() -> Result<()> {
    let app = test_app(MockWetro::new());

    let res = send(&app, Method::GET, "/api/check-auth", None, None).await?;
    assert_eq!(res.body, json!({ "isAuthenticated": false }));

    let res = send(&app, Method::GET, "/api/check-auth", Some("wetro-api-key=sk-nope"), None).await?;
    assert_eq!(res.body, json!({ "isAuthenticated": false }));

    let res = send(&app, Method::GET, "/api/check-auth", Some("wetro-api-key=wtc-anything"), None).await?;
    assert_eq!(res.body, json!({ "isAuthenticated": true }));
    Ok(())
}

#[tokio::test]
async fn set_api_key_sets_a_locked_down_cookie() -> Result<()> {
    let app = test_app(MockWetro::new());
    let body = json!({ "apiKey": VALID_KEY }).to_string();

    let res = send(&app, Method::POST, "/api/set-api-key", None, Some(&body)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "success": true }));

    let cookie = res.cookie("wetro-api-key").expect("key cookie");
    assert!(cookie.starts_with(&format!("wetro-api-key={}", VALID_KEY)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));

    // The browser sends it back and the gate opens
    let echoed = format!("wetro-api-key={}", VALID_KEY);
    let res = send(&app, Method::GET, "/api/check-auth", Some(&echoed), None).await?;
    assert_eq!(res.body, json!({ "isAuthenticated": true }));
    Ok(())
}

#[tokio::test]
async fn set_api_key_rejects_bad_keys_without_a_cookie() -> Result<()> {
    let app = test_app(MockWetro::new());

    for body in [
        json!({ "apiKey": "sk-not-ours" }),
        json!({ "apiKey": "" }),
        json!({ "apiKey": 42 }),
        json!({}),
    ] {
        let res = send(&app, Method::POST, "/api/set-api-key", None, Some(&body.to_string())).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["error"], "Invalid API key");
        assert!(res.cookie("wetro-api-key").is_none());
    }
    Ok(())
}

#[tokio::test]
async fn set_api_key_rejects_malformed_json() -> Result<()> {
    let app = test_app(MockWetro::new());

    let res = send(&app, Method::POST, "/api/set-api-key", None, Some("{not json")).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid request");
    assert!(res.cookie("wetro-api-key").is_none());
    Ok(())
}

#[tokio::test]
async fn strict_gate_enforces_key_length() -> Result<()> {
    let mut config = test_config("http://127.0.0.1:9");
    config.security.strict_key_length = true;
    let app = test_app_with(config, MockWetro::new());

    let short = json!({ "apiKey": "wtc-short" }).to_string();
    let res = send(&app, Method::POST, "/api/set-api-key", None, Some(&short)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let exact = json!({ "apiKey": VALID_KEY }).to_string();
    let res = send(&app, Method::POST, "/api/set-api-key", None, Some(&exact)).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wildcard_cors_origin_is_ignored_at_startup() -> Result<()> {
    let mut config = test_config("http://127.0.0.1:9");
    config.security.cors_origins = vec!["*".to_string(), "http://localhost:3000".to_string()];
    let app = test_app_with(config, MockWetro::new());

    let res = send(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}
