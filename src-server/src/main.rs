// FICHIER : src-server/src/main.rs

use antiphona::api::{self, AppState};
use antiphona::json_db::collections::CollectionsManager;
use antiphona::json_db::storage::{JsonDbConfig, StorageEngine};
use antiphona::utils::{init_logging, AppConfig};

use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = match AppConfig::init() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Erreur fatale de configuration : {}", e);
            std::process::exit(1);
        }
    };
    init_logging(config);

    if let Err(e) = run(config).await {
        tracing::error!("❌ Arrêt du serveur : {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let storage = StorageEngine::new(JsonDbConfig::new(config.data_root.clone()));
    CollectionsManager::new(&storage, &config.space, &config.db)
        .init_db()
        .await?;
    tracing::info!(
        data_root = ?config.data_root,
        space = %config.space,
        db = %config.db,
        "Base prête"
    );

    let app = api::router(AppState::from_config(config, storage));
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Antiphona à l'écoute sur http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Serveur arrêté");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Signal d'arrêt indisponible : {}", e);
    }
}
