// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// One dossier could not be extracted. The batch logs it and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("dossier {dossier_id}: source answered HTTP {status}")]
    Retrieval { dossier_id: String, status: u16 },

    #[error("dossier {dossier_id}: request failed: {source}")]
    Transport {
        dossier_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("dossier {dossier_id}: unparseable page: {reason}")]
    Parse { dossier_id: String, reason: String },
}

/// A persisted JSON file (dataset or batch list) is missing or corrupt.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Query key matched nothing. Surfaced to clients, not a server fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("no activities found for category {0:?}")]
    CategoryNotFound(String),

    #[error("no activities found for dossier {0:?}")]
    DossierNotFound(String),
}

/// Merging per-dossier files into one dataset file.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
