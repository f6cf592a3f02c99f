// FICHIER : src-server/src/utils/config.rs

use crate::utils::env;
use crate::utils::error::{AppError, AppResult};
use crate::utils::json::{self, Value};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Singleton global pour la configuration
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub const DEFAULT_SPACE: &str = "liturgy";
pub const DEFAULT_DB: &str = "antiphonary";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DOMAIN_DIR: &str = "antiphona_domain";

/// Configuration du service.
///
/// Sources par ordre de priorité croissante : valeurs par défaut, fichier JSON
/// désigné par `ANTIPHONA_CONFIG`, puis variables `ANTIPHONA_*`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub data_root: PathBuf,
    #[serde(default = "default_space")]
    pub space: String,
    #[serde(default = "default_db")]
    pub db: String,
    #[serde(default = "default_bind")]
    pub bind_addr: String,
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

// --- HELPERS SERDE ---

fn default_space() -> String {
    DEFAULT_SPACE.to_string()
}
fn default_db() -> String {
    DEFAULT_DB.to_string()
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_root = dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(DEFAULT_DOMAIN_DIR);
        Self {
            data_root,
            space: default_space(),
            db: default_db(),
            bind_addr: default_bind(),
            public_base_url: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Initialise le singleton (idempotent) et le retourne.
    pub fn init() -> AppResult<&'static AppConfig> {
        if let Some(cfg) = CONFIG.get() {
            return Ok(cfg);
        }

        let config = if cfg!(test) {
            Self::test_sandbox()
        } else {
            let file = env::get_path(&env::key("CONFIG"));
            Self::load(file.as_deref())?
        };

        Ok(CONFIG.get_or_init(|| config))
    }

    /// Accès au singleton.
    pub fn get() -> AppResult<&'static AppConfig> {
        CONFIG.get().ok_or_else(|| {
            AppError::Config("Configuration non initialisée (AppConfig::init)".to_string())
        })
    }

    /// Chargement pur (sans singleton) : défauts < fichier < environnement.
    pub fn load(file: Option<&Path>) -> AppResult<Self> {
        let mut merged = json::to_value(Self::default())?;

        if let Some(path) = file {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!(
                    "Lecture impossible de {} : {}",
                    path.to_string_lossy(),
                    e
                ))
            })?;
            let overlay: Value = json::parse(&content)?;
            if !overlay.is_object() {
                return Err(AppError::Config(format!(
                    "Format invalide dans {} : objet JSON attendu",
                    path.to_string_lossy()
                )));
            }
            json::merge(&mut merged, overlay);
        }

        let mut config: AppConfig = serde_json::from_value(merged)
            .map_err(|e| AppError::Config(format!("Configuration invalide : {}", e)))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(root) = env::get_path(&env::key("DATA_ROOT")) {
            self.data_root = root;
        }
        if let Some(space) = env::get_optional(&env::key("SPACE")) {
            self.space = space;
        }
        if let Some(db) = env::get_optional(&env::key("DB")) {
            self.db = db;
        }
        if let Some(bind) = env::get_optional(&env::key("BIND")) {
            self.bind_addr = bind;
        }
        if let Some(url) = env::get_optional(&env::key("PUBLIC_URL")) {
            self.public_base_url = Some(url);
        }
        if let Some(level) = env::get_optional(&env::key("LOG_LEVEL")) {
            self.log_level = level;
        }
        if let Some(dir) = env::get_path(&env::key("LOG_DIR")) {
            self.log_dir = Some(dir);
        }
    }

    fn validate(&self) -> AppResult<()> {
        self.socket_addr()?;
        if self.space.trim().is_empty() || self.db.trim().is_empty() {
            return Err(AppError::Config(
                "Les noms d'espace et de base ne peuvent pas être vides".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        self.bind_addr.parse().map_err(|_| {
            AppError::Config(format!("Adresse d'écoute invalide : {}", self.bind_addr))
        })
    }

    /// Base des URLs de ressources, sans slash final.
    pub fn base_url(&self) -> String {
        let raw = self
            .public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.bind_addr));
        raw.trim_end_matches('/').to_string()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_root.join("_system").join("logs"))
    }

    fn test_sandbox() -> Self {
        let root = std::env::temp_dir().join(format!("antiphona_test_{}", std::process::id()));
        Self {
            data_root: root,
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}
