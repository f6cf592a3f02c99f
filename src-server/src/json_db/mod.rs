// FICHIER : src-server/src/json_db/mod.rs

//! Base documentaire JSON sur fichiers : un document par fichier,
//! `{data_root}/{space}/{db}/collections/{collection}/{id}.json`.

pub mod collections;
pub mod storage;
