//! Gestionnaire de collections JSON

pub mod collection;
pub mod manager;

pub use manager::CollectionsManager;

/// Champs gérés par le moteur sur chaque document.
pub const ID_FIELD: &str = "id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
