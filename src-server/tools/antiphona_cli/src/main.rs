// FICHIER : src-server/tools/antiphona_cli/src/main.rs

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

use antiphona::json_db::collections::CollectionsManager;
use antiphona::json_db::storage::file_storage::DropMode;
use antiphona::json_db::storage::{JsonDbConfig, StorageEngine};
use antiphona::model_engine::{Antiphona, Celebration, Fields, Model, Repository};
use antiphona::api::serializers::DOES_NOT_EXIST;
use antiphona::utils::{AppConfig, AppError, FieldErrors};
use antiphona::validators::FieldValue;

#[derive(Parser)]
#[command(
    name = "antiphona_cli",
    author = "Antiphonary Team",
    version,
    about = "Outil d'administration de la base d'antiennes"
)]
struct Cli {
    /// Dossier racine des données (sinon la configuration du service)
    #[arg(long, env = "ANTIPHONA_DATA_ROOT")]
    root: Option<PathBuf>,

    #[arg(short, long)]
    space: Option<String>,

    #[arg(short, long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    CreateDb,
    DropDb {
        #[arg(long, short = 'f')]
        force: bool,
    },
    ListCollections,
    #[command(subcommand)]
    Antiphona(AntiphonaCommand),
    #[command(subcommand)]
    Celebration(CelebrationCommand),
}

#[derive(Subcommand)]
enum AntiphonaCommand {
    Add {
        /// Objet JSON langue -> texte, ex. '{"la": "Rorate caeli"}'
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "")]
        link: String,
    },
    List,
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum CelebrationCommand {
    Add {
        #[arg(long)]
        name: String,
        /// advent | christmas | lent | easter | ordinary
        #[arg(long)]
        season: String,
        /// Antiennes, dans l'ordre (option répétable)
        #[arg(long = "antiphona")]
        antiphonas: Vec<String>,
    },
    List,
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Erreurs de validation : la carte champ -> messages, telle quelle.
            match e.downcast_ref::<AppError>() {
                Some(AppError::Validation(errors)) => match serde_json::to_string_pretty(errors) {
                    Ok(map) => eprintln!("❌ Données invalides :\n{}", map),
                    Err(_) => eprintln!("❌ {}", errors),
                },
                _ => eprintln!("❌ {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base = AppConfig::load(None)?;
    let root = cli.root.unwrap_or(base.data_root);
    let space = cli.space.unwrap_or(base.space);
    let db = cli.db.unwrap_or(base.db);

    let storage = StorageEngine::new(JsonDbConfig::new(root));
    let mgr = CollectionsManager::new(&storage, &space, &db);

    if !matches!(cli.command, Commands::CreateDb | Commands::DropDb { .. }) {
        mgr.init_db().await?;
    }

    match cli.command {
        // --- GESTION DB ---
        Commands::CreateDb => {
            println!("🔨 Création de la base '{}/{}'...", space, db);
            mgr.init_db().await?;
            for collection in [Antiphona::COLLECTION, Celebration::COLLECTION] {
                mgr.create_collection(collection).await?;
                println!("   - {} OK", collection);
            }
            println!("✅ Base de données prête.");
        }

        Commands::DropDb { force } => {
            let mode = if force {
                DropMode::Hard
            } else {
                DropMode::Soft
            };
            println!("🗑️  Suppression [Mode: {:?}]...", mode);
            mgr.drop_db(mode).await?;
            println!("✅ Terminé.");
        }

        Commands::ListCollections => {
            println!("📂 Collections dans {}/{}:", space, db);
            for c in mgr.list_collections().await? {
                println!("  - {}", c);
            }
        }

        // --- ANTIENNES ---
        Commands::Antiphona(cmd) => {
            let repo = Repository::<Antiphona>::from_manager(mgr);
            match cmd {
                AntiphonaCommand::Add { text, link } => {
                    let text: Value = serde_json::from_str(&text)
                        .map_err(|e| anyhow!("--text n'est pas du JSON valide : {}", e))?;
                    let mut fields = Fields::new();
                    fields.insert("text".into(), FieldValue::from(text));
                    fields.insert("link".into(), FieldValue::from(link));
                    let record = repo.create(fields).await?;
                    println!("✅ Antienne créée ID: {}", record.id);
                }
                AntiphonaCommand::List => print_all(&repo.all().await?)?,
                AntiphonaCommand::Get { id } => print_one(repo.get(&id).await?, &id)?,
                AntiphonaCommand::Delete { id } => report_delete(repo.delete(&id).await?, &id)?,
            }
        }

        // --- CÉLÉBRATIONS ---
        Commands::Celebration(cmd) => {
            let repo = Repository::<Celebration>::from_manager(mgr);
            match cmd {
                CelebrationCommand::Add {
                    name,
                    season,
                    antiphonas,
                } => {
                    let known = Repository::<Antiphona>::new(&storage, &space, &db);
                    for id in &antiphonas {
                        if !known.exists(id).await? {
                            return Err(AppError::from(FieldErrors::single(
                                "antiphonas",
                                DOES_NOT_EXIST,
                            ))
                            .into());
                        }
                    }
                    let mut fields = Fields::new();
                    fields.insert("name".into(), FieldValue::from(name));
                    fields.insert("liturgical_season".into(), FieldValue::from(season));
                    fields.insert("antiphonas".into(), FieldValue::from(antiphonas));
                    let record = repo.create(fields).await?;
                    println!(
                        "✅ Célébration créée ID: {} ({} antienne(s))",
                        record.id,
                        record.antiphonas.len()
                    );
                }
                CelebrationCommand::List => print_all(&repo.all().await?)?,
                CelebrationCommand::Get { id } => {
                    let record = repo.get(&id).await?;
                    let dangling = match &record {
                        Some(r) => {
                            r.antiphonas.len()
                                - repo.resolve_references(&r.antiphonas).await?.len()
                        }
                        None => 0,
                    };
                    print_one(record, &id)?;
                    if dangling > 0 {
                        println!("⚠️  {} référence(s) pendante(s)", dangling);
                    }
                }
                CelebrationCommand::Delete { id } => {
                    report_delete(repo.delete(&id).await?, &id)?
                }
            }
        }
    }

    Ok(())
}

fn print_all<T: Serialize>(records: &[T]) -> Result<()> {
    println!("--- {} documents ---", records.len());
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn print_one<T: Serialize>(record: Option<T>, id: &str) -> Result<()> {
    match record {
        Some(r) => {
            println!("{}", serde_json::to_string_pretty(&r)?);
            Ok(())
        }
        None => Err(anyhow!("Introuvable : {}", id)),
    }
}

fn report_delete(existed: bool, id: &str) -> Result<()> {
    if existed {
        println!("✅ Supprimé : {}", id);
        Ok(())
    } else {
        Err(anyhow!("Introuvable : {}", id))
    }
}
