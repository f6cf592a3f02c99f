// FICHIER : src-server/tests/api_suite/celebrations_api.rs

use crate::{init_test_app, path_of};
use antiphona::model_engine::{Celebration, Repository};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn blank_fields_are_reported_together() {
    let app = init_test_app().await;
    let (status, body) = app.post("/celebrations/", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "liturgical_season": ["This field cannot be blank."],
            "name": ["This field cannot be blank."],
        })
    );
}

#[tokio::test]
async fn wrong_season_is_rejected() {
    let app = init_test_app().await;
    let (status, body) = app
        .post(
            "/celebrations/",
            json!({ "name": "Valid name", "liturgical_season": "I am invalid" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["liturgical_season"][0]
        .as_str()
        .unwrap()
        .contains("is not a valid choice"));
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn create_without_antiphonas() {
    let app = init_test_app().await;
    let (status, body) = app
        .post(
            "/celebrations/",
            json!({ "name": "Dominica I Adventus", "liturgical_season": "advent" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["antiphonas"], json!([]));
    assert_eq!(body["liturgical_season"], "advent");
}

#[tokio::test]
async fn antiphonas_keep_the_supplied_order() {
    let app = init_test_app().await;
    let first = app.new_antiphona(1).await;
    let second = app.new_antiphona(2).await;

    // URL complète et identifiant nu sont acceptés.
    let bare_first = first.trim_end_matches('/').rsplit('/').next().unwrap().to_string();
    let (status, created) = app
        .post(
            "/celebrations/",
            json!({
                "name": "Dominica I Adventus",
                "liturgical_season": "advent",
                "antiphonas": [second.clone(), bare_first],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["antiphonas"], json!([second.clone(), first.clone()]));

    let (_, fetched) = app.get(path_of(created["url"].as_str().unwrap())).await;
    assert_eq!(fetched["antiphonas"], json!([second, first]));
}

#[tokio::test]
async fn unknown_antiphona_is_an_invalid_hyperlink() {
    let app = init_test_app().await;
    let (status, body) = app
        .post(
            "/celebrations/",
            json!({
                "name": "",
                "liturgical_season": "lent",
                "antiphonas": ["http://testserver/antiphonas/ghost/"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "antiphonas": ["Invalid hyperlink - Object does not exist."],
            "name": ["This field cannot be blank."],
        })
    );

    let (status, body) = app
        .post(
            "/celebrations/",
            json!({
                "name": "Dominica in Palmis",
                "liturgical_season": "lent",
                "antiphonas": ["http://testserver/celebrations/x/"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"antiphonas": ["Invalid hyperlink - No URL match."]}));

    let (_, list) = app.get("/celebrations/").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn patch_replaces_references_only_when_supplied() {
    let app = init_test_app().await;
    let a = app.new_antiphona(1).await;
    let b = app.new_antiphona(2).await;

    let (_, created) = app
        .post(
            "/celebrations/",
            json!({ "name": "Nativitas", "liturgical_season": "christmas", "antiphonas": [a.clone()] }),
        )
        .await;
    let path = path_of(created["url"].as_str().unwrap()).to_string();

    let (status, renamed) = app
        .call(Method::PATCH, &path, Some(json!({ "name": "In Nativitate Domini" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["antiphonas"], json!([a.clone()]));

    let (status, relinked) = app
        .call(Method::PATCH, &path, Some(json!({ "antiphonas": [b.clone(), a.clone()] })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(relinked["antiphonas"], json!([b, a]));
    assert_eq!(relinked["name"], "In Nativitate Domini");

    let (status, body) = app
        .call(Method::PUT, &path, Some(json!({ "name": "Nativitas" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"liturgical_season": ["This field cannot be blank."]}));
}

#[tokio::test]
async fn deleting_an_antiphona_does_not_cascade() {
    let app = init_test_app().await;
    let a = app.new_antiphona(1).await;

    let (_, created) = app
        .post(
            "/celebrations/",
            json!({ "name": "Pascha", "liturgical_season": "easter", "antiphonas": [a.clone()] }),
        )
        .await;

    let (status, _) = app.call(Method::DELETE, path_of(&a), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) = app.get(path_of(created["url"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["antiphonas"], json!([a]));

    // Référence pendante : conservée, mais non résolue.
    let repo = Repository::<Celebration>::new(&app.storage, "liturgy", "antiphonary");
    let all = repo.all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(repo
        .resolve_references(&all[0].antiphonas)
        .await
        .unwrap()
        .is_empty());
}
