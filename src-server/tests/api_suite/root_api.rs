// FICHIER : src-server/tests/api_suite/root_api.rs

use crate::init_test_app;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn root_lists_both_resources() {
    let app = init_test_app().await;
    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "antiphonas": "http://testserver/antiphonas/",
            "celebrations": "http://testserver/celebrations/",
        })
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = init_test_app().await;
    let (status, _) = app.get("/psalms/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = init_test_app().await;
    let (status, body) = app
        .call_raw(Method::POST, "/antiphonas/", "{\"text\": ".to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error"));
}

#[tokio::test]
async fn non_object_body_is_400() {
    let app = init_test_app().await;
    let (status, body) = app.post("/celebrations/", json!(["advent"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
    );
}
