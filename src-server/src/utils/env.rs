// FICHIER : src-server/src/utils/env.rs

use crate::utils::error::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Préfixe commun de toutes les variables du service.
pub const ENV_PREFIX: &str = "ANTIPHONA_";

/// Nom complet d'une variable du service : `key("BIND")` → `ANTIPHONA_BIND`.
pub fn key(suffix: &str) -> String {
    format!("{}{}", ENV_PREFIX, suffix)
}

/// Récupère une variable d'environnement (Requis).
pub fn get(key: &str) -> AppResult<String> {
    env::var(key)
        .map_err(|_| AppError::Config(format!("Variable d'environnement manquante : {}", key)))
}

/// Récupère une variable d'environnement (Optionnel, vide = absente).
pub fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_or(key: &str, default: &str) -> String {
    get_optional(key).unwrap_or_else(|| default.to_string())
}

pub fn get_path(key: &str) -> Option<PathBuf> {
    get_optional(key).map(PathBuf::from)
}

/// Récupère et parse une variable (ex: PORT=8080).
pub fn get_parsed<T: FromStr>(key: &str) -> AppResult<T> {
    let val = get(key)?;
    val.trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("Impossible de parser la variable : {}", key)))
}

/// Indique si une feature flag est active (ex: "true", "1", "yes").
pub fn is_enabled(key: &str) -> bool {
    matches!(
        get_optional(key).as_deref(),
        Some("true") | Some("1") | Some("yes") | Some("on")
    )
}
