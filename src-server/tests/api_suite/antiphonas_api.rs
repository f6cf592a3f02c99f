// FICHIER : src-server/tests/api_suite/antiphonas_api.rs

use crate::{init_test_app, path_of, sample_text};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_with_empty_body_uses_defaults() {
    let app = init_test_app().await;
    let (status, body) = app.post("/antiphonas/", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["text"], json!({}));
    assert_eq!(body["link"], "");
    assert!(body["url"]
        .as_str()
        .unwrap()
        .starts_with("http://testserver/antiphonas/"));
}

#[tokio::test]
async fn create_and_retrieve() {
    let app = init_test_app().await;
    let text = sample_text(3);
    let link = "https://gregobase.selapa.net/chant.php?id=7911";

    let (status, created) = app
        .post("/antiphonas/", json!({ "text": text, "link": link }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let url = created["url"].as_str().unwrap();
    let (status, fetched) = app.get(path_of(url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["text"], text);
    assert_eq!(fetched["link"], link);
}

#[tokio::test]
async fn validation_errors_are_reported_per_field() {
    let app = init_test_app().await;

    let (status, body) = app
        .post("/antiphonas/", json!({ "text": ["this is not a dict"] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["text"][0].as_str().unwrap().contains("must be of type dict"));

    let (status, body) = app
        .post("/antiphonas/", json!({ "text": {"es_ES": 123, "es_AR": 456} }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["text"][0].as_str().unwrap().contains("must be of type str"));

    let (status, body) = app
        .post(
            "/antiphonas/",
            json!({ "text": {"456": "x", "123": "y"}, "link": "an invalid url" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["text"][0].as_str().unwrap().contains("123, 456 are invalid keys"));
    assert_eq!(body["link"], json!(["Enter a valid URL."]));

    let (_, list) = app.get("/antiphonas/").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_is_in_creation_order() {
    let app = init_test_app().await;
    let mut urls = Vec::new();
    for n in 1..=3 {
        urls.push(app.new_antiphona(n).await);
    }

    let (status, list) = app.get("/antiphonas/").await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["url"].as_str().unwrap())
        .collect();
    assert_eq!(listed, urls);
}

#[tokio::test]
async fn put_resets_missing_fields_and_patch_keeps_them() {
    let app = init_test_app().await;
    let (_, created) = app
        .post(
            "/antiphonas/",
            json!({ "text": sample_text(2), "link": "https://example.org/rorate" }),
        )
        .await;
    let path = path_of(created["url"].as_str().unwrap()).to_string();

    let (status, patched) = app
        .call(Method::PATCH, &path, Some(json!({ "text": {"la": "Rorate caeli"} })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["text"], json!({"la": "Rorate caeli"}));
    assert_eq!(patched["link"], "https://example.org/rorate");

    let (status, put) = app
        .call(Method::PUT, &path, Some(json!({ "text": {"la": "Rorate caeli"} })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(put["link"], "");

    let (status, body) = app
        .call(Method::PATCH, &path, Some(json!({ "link": "nope" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"link": ["Enter a valid URL."]}));
}

#[tokio::test]
async fn delete_then_404() {
    let app = init_test_app().await;
    let url = app.new_antiphona(1).await;
    let path = path_of(&url).to_string();

    let (status, body) = app.call(Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = app.get(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not found."}));

    let (status, _) = app.call(Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(Method::PUT, &path, Some(json!({ "text": {} })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
