// FICHIER : src-server/tests/model_suite/antiphona_model.rs

use crate::{init_test_env, sample_text};
use antiphona::model_engine::{Antiphona, Fields, Repository};
use antiphona::utils::{AppError, FieldErrors};
use antiphona::validators::{FieldValue, VALID_LANGUAGES};

fn text_only(text: FieldValue) -> Fields {
    Fields::from([("text".to_string(), text)])
}

async fn create_errors(fields: Fields) -> FieldErrors {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    let err = repo.create(fields).await.expect_err("la création doit échouer");
    assert!(repo.all().await.unwrap().is_empty(), "rien ne doit être persisté");
    match err {
        AppError::Validation(errors) => errors,
        other => panic!("erreur de validation attendue, reçu {other:?}"),
    }
}

fn first(errors: &FieldErrors, field: &str) -> String {
    errors.get(field).expect("erreur sur le champ")[0].clone()
}

#[tokio::test]
async fn create_with_empty_values() {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);

    let a = repo.create(Fields::new()).await.unwrap();
    assert!(a.text.is_empty());
    assert_eq!(a.link, "");
    assert!(!a.created_at.is_empty());
}

#[tokio::test]
async fn text_must_be_a_dict() {
    let errors = create_errors(text_only(FieldValue::from(vec!["this is not a dict"]))).await;
    assert!(first(&errors, "text").contains("must be of type dict"));
}

#[tokio::test]
async fn text_keys_must_be_strings() {
    // Clé non textuelle ET hors liste : le contrôle de type passe en premier.
    let text = FieldValue::Map(vec![
        (FieldValue::Int(123), FieldValue::str("123")),
        (FieldValue::Int(456), FieldValue::str("456")),
    ]);
    let errors = create_errors(text_only(text)).await;
    let msg = first(&errors, "text");
    assert!(msg.contains("must be of type str"), "{msg}");
    assert!(!msg.contains("are invalid keys"));
}

#[tokio::test]
async fn text_values_must_be_strings() {
    let text = FieldValue::map_of([("es_ES", 123i64), ("es_AR", 456i64)]);
    let errors = create_errors(text_only(text)).await;
    assert!(first(&errors, "text").contains("must be of type str"));
}

#[tokio::test]
async fn invalid_keys_are_listed_sorted() {
    let text = FieldValue::map_of([("zz", "a"), ("123", "b"), ("la", "c"), ("abc", "d")]);
    let errors = create_errors(text_only(text)).await;
    let msg = first(&errors, "text");
    assert!(msg.contains("are invalid keys"));
    assert!(msg.starts_with("Value: 123, abc, zz are invalid keys"), "{msg}");
}

#[tokio::test]
async fn link_must_be_valid_url() {
    let fields = Fields::from([("link".to_string(), FieldValue::str("an invalid url"))]);
    let errors = create_errors(fields).await;
    assert!(first(&errors, "link").contains("Enter a valid URL"));
}

#[tokio::test]
async fn valid_values_round_trip() {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);

    let link = "https://gregobase.selapa.net/chant.php?id=7911";
    let fields = Fields::from([
        ("text".to_string(), sample_text(VALID_LANGUAGES.len())),
        ("link".to_string(), FieldValue::str(link)),
    ]);
    let created = repo.create(fields).await.unwrap();
    assert_eq!(created.text.len(), VALID_LANGUAGES.len());
    assert_eq!(created.link, link);

    let reloaded = repo.get(&created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, created);
    assert_eq!(reloaded.text["la"], "Antiphona 6 (la)");
}

#[tokio::test]
async fn subset_of_languages_is_accepted() {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    for n in 1..=VALID_LANGUAGES.len() {
        let a = repo.create(text_only(sample_text(n))).await.unwrap();
        assert_eq!(a.text.len(), n);
    }
    assert_eq!(repo.all().await.unwrap().len(), VALID_LANGUAGES.len());
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let fields = Fields::from([("title".to_string(), FieldValue::str("Rorate"))]);
    let errors = create_errors(fields).await;
    assert_eq!(errors.get("title").unwrap(), ["Unknown field."]);
}
