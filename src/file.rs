// src/file.rs

use std::{
    collections::HashSet,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::core::sanitize::{dossier_file_stem, id_from_file_stem};
use crate::error::{LoadError, MergeError, PersistError};
use crate::model::{DossierSpec, Entry};

pub const JSON_EXT: &str = "json";

/// Decode a whole JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| LoadError::Decode { path: path.to_path_buf(), source })
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(io_err)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)
        .map_err(|source| PersistError::Encode { path: path.to_path_buf(), source })?;
    out.write_all(b"\n").map_err(io_err)?;
    out.flush().map_err(io_err)?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PersistError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistError::Io { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}

/// `<dir>/<escaped id>.json`. One file per distinct id.
pub fn dossier_file_path(dir: &Path, dossier_id: &str) -> PathBuf {
    dir.join(join!(&dossier_file_stem(dossier_id), ".", JSON_EXT))
}

/// Persist one dossier's rows. Callers never pass an empty slice: dossiers
/// without activities get no file.
pub fn write_dossier_file(dir: &Path, dossier_id: &str, entries: &[Entry]) -> Result<PathBuf, PersistError> {
    let path = dossier_file_path(dir, dossier_id);
    write_json(&path, entries)?;
    Ok(path)
}

pub fn read_entries(path: &Path) -> Result<Vec<Entry>, LoadError> {
    read_json(path)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub entries: usize,
    /// Listed dossiers that had no file (no activities, or failed scrape).
    pub missing: Vec<String>,
}

/// Concatenate per-dossier files into one dataset file.
///
/// With `order`, files are taken in batch-list order (each dossier once);
/// without it, every `*.json` in `dir` is taken, numeric ids first in
/// numeric order, then the rest by id.
pub fn merge_dossier_files(
    dir: &Path,
    order: Option<&[DossierSpec]>,
    out: &Path,
) -> Result<MergeSummary, MergeError> {
    let paths = match order {
        Some(specs) => listed_paths(dir, specs),
        None => dir_paths(dir, out)?,
    };

    let mut summary = MergeSummary::default();
    let mut all: Vec<Entry> = Vec::new();
    for p in paths {
        match p {
            Ok(path) => {
                let mut rows = read_entries(&path)?;
                tracing::debug!(path = %path.display(), rows = rows.len(), "merging");
                summary.files += 1;
                all.append(&mut rows);
            }
            Err(id) => summary.missing.push(id),
        }
    }
    summary.entries = all.len();

    write_json(out, &all)?;
    Ok(summary)
}

fn listed_paths(dir: &Path, specs: &[DossierSpec]) -> Vec<Result<PathBuf, String>> {
    let mut seen = HashSet::new();
    specs
        .iter()
        .filter(|s| seen.insert(s!(s.id())))
        .map(|s| {
            let p = dossier_file_path(dir, s.id());
            if p.is_file() { Ok(p) } else { Err(s!(s.id())) }
        })
        .collect()
}

fn dir_paths(dir: &Path, out: &Path) -> Result<Vec<Result<PathBuf, String>>, LoadError> {
    let read_err = |source| LoadError::Read { path: dir.to_path_buf(), source };
    let out_abs = fs::canonicalize(out).ok();

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some(JSON_EXT) { continue; }
        if out_abs.is_some() && fs::canonicalize(&path).ok() == out_abs { continue; }
        paths.push(path);
    }

    paths.sort_by_key(|p| {
        let id = p.file_stem().map(|s| id_from_file_stem(&s.to_string_lossy())).unwrap_or_default();
        match id.parse::<u64>() {
            Ok(n) => (0u8, n, id),
            Err(_) => (1u8, 0, id),
        }
    });
    Ok(paths.into_iter().map(Ok).collect())
}
