// FICHIER : src-server/src/utils/mod.rs

// =========================================================================
//  Foundation Layer
// =========================================================================

pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;

// --> Config & Erreurs
pub use config::AppConfig;
pub use error::{AppError, AppResult, FieldErrors};
pub use logger::init_logging;
