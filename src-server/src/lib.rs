// FICHIER : src-server/src/lib.rs

pub mod api;
pub mod json_db;
pub mod model_engine;
pub mod utils;
pub mod validators;
