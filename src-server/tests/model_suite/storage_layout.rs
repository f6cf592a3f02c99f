// FICHIER : src-server/tests/model_suite/storage_layout.rs

use crate::init_test_env;
use antiphona::json_db::collections::CollectionsManager;
use antiphona::json_db::storage::file_storage::DropMode;
use antiphona::json_db::storage::StorageEngine;
use antiphona::model_engine::{Antiphona, Fields, Repository};

#[tokio::test]
async fn documents_land_in_their_collection_folder() {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    let a = repo.create(Fields::new()).await.unwrap();

    let path = env
        .cfg
        .db_collection_path(&env.space, &env.db, "antiphonas")
        .join(format!("{}.json", a.id));
    assert!(path.exists());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["id"], a.id.as_str());
    assert_eq!(raw["link"], "");
    assert!(raw["createdAt"].is_string());
    assert!(raw["updatedAt"].is_string());
}

#[tokio::test]
async fn a_fresh_engine_reads_what_another_wrote() {
    let env = init_test_env().await;
    let repo = Repository::<Antiphona>::new(&env.storage, &env.space, &env.db);
    let a = repo.create(Fields::new()).await.unwrap();

    // Cache vide : lecture depuis le disque.
    let cold = StorageEngine::new(env.cfg.clone());
    let reread = Repository::<Antiphona>::new(&cold, &env.space, &env.db)
        .get(&a.id)
        .await
        .unwrap();
    assert_eq!(reread, Some(a));
}

#[tokio::test]
async fn soft_drop_keeps_a_backup() {
    let env = init_test_env().await;
    let mgr = CollectionsManager::new(&env.storage, &env.space, &env.db);
    mgr.create_collection("antiphonas").await.unwrap();
    assert_eq!(mgr.list_collections().await.unwrap(), vec!["antiphonas"]);

    mgr.drop_db(DropMode::Soft).await.unwrap();
    assert!(!env.cfg.db_root(&env.space, &env.db).exists());
    assert!(mgr.open_db().await.is_err());

    let space_root = env.cfg.data_root.join(&env.space);
    let backups = std::fs::read_dir(space_root)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().contains(".deleted-"))
        .count();
    assert_eq!(backups, 1);
}
