// FICHIER : src-server/tests/model_suite/celebration_model.rs

use crate::{init_test_env, sample_text};
use antiphona::model_engine::{Antiphona, Celebration, Fields, LiturgicalSeason, Repository};
use antiphona::utils::AppError;
use antiphona::validators::FieldValue;

fn celebration(name: &str, season: &str) -> Fields {
    Fields::from([
        ("name".to_string(), FieldValue::str(name)),
        ("liturgical_season".to_string(), FieldValue::str(season)),
    ])
}

#[tokio::test]
async fn create_with_empty_values_reports_both_fields() {
    let env = init_test_env().await;
    let repo = Repository::<Celebration>::new(&env.storage, &env.space, &env.db);

    let AppError::Validation(errors) = repo.create(Fields::new()).await.unwrap_err() else {
        panic!("erreur de validation attendue");
    };
    let expected = serde_json::json!({
        "liturgical_season": ["This field cannot be blank."],
        "name": ["This field cannot be blank."],
    });
    assert_eq!(serde_json::to_value(&errors).unwrap(), expected);
}

#[tokio::test]
async fn create_with_wrong_season() {
    let env = init_test_env().await;
    let repo = Repository::<Celebration>::new(&env.storage, &env.space, &env.db);

    let AppError::Validation(errors) = repo
        .create(celebration("Valid name", "I am invalid"))
        .await
        .unwrap_err()
    else {
        panic!("erreur de validation attendue");
    };
    assert!(errors.get("liturgical_season").unwrap()[0].contains("is not a valid choice"));
}

#[tokio::test]
async fn create_without_antiphonas() {
    let env = init_test_env().await;
    let repo = Repository::<Celebration>::new(&env.storage, &env.space, &env.db);

    let c = repo.create(celebration("Valid name", "advent")).await.unwrap();
    assert_eq!(c.liturgical_season, LiturgicalSeason::Advent);
    assert!(c.antiphonas.is_empty());
}

#[tokio::test]
async fn create_with_antiphonas_keeps_order_after_reload() {
    let env = init_test_env().await;
    let antiphonas = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    let celebrations = Repository::<Celebration>::new(&env.storage, &env.space, &env.db);

    let text = |n| Fields::from([("text".to_string(), sample_text(n))]);
    let a1 = antiphonas.create(text(2)).await.unwrap();
    let a2 = antiphonas.create(text(3)).await.unwrap();

    let c = celebrations
        .create_with_references(
            celebration("Valid name", "advent"),
            "antiphonas",
            vec![a1.id.clone(), a2.id.clone()],
        )
        .await
        .unwrap();

    let reloaded = celebrations.get(&c.id).await.unwrap().unwrap();
    assert_eq!(reloaded.antiphonas, vec![a1.id.clone(), a2.id.clone()]);
    let resolved = celebrations
        .resolve_references(&reloaded.antiphonas)
        .await
        .unwrap();
    assert_eq!(resolved, vec![a1, a2]);
}

#[tokio::test]
async fn deleting_an_antiphona_leaves_a_dangling_reference() {
    let env = init_test_env().await;
    let antiphonas = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    let celebrations = Repository::<Celebration>::new(&env.storage, &env.space, &env.db);

    let a = antiphonas.create(Fields::new()).await.unwrap();
    let mut fields = celebration("Dominica in Palmis", "lent");
    fields.insert("antiphonas".into(), FieldValue::from(vec![a.id.clone()]));
    let c = celebrations.create(fields).await.unwrap();

    assert!(antiphonas.delete(&a.id).await.unwrap());
    assert!(!antiphonas.delete(&a.id).await.unwrap());

    let c = celebrations.get(&c.id).await.unwrap().unwrap();
    assert_eq!(c.antiphonas, vec![a.id]);
    assert!(celebrations
        .resolve_references(&c.antiphonas)
        .await
        .unwrap()
        .is_empty());
}
