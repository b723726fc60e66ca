// src/store.rs
use std::path::Path;

use crate::{error::LoadError, file, link, model::Entry};

/// The loaded activity rows, in file order. Read-only once built.
#[derive(Debug, Default)]
pub struct Dataset {
    entries: Vec<Entry>,
}

impl Dataset {
    /// Read the dataset file. Missing, unreadable or malformed files are a
    /// `LoadError`; callers must not serve without a dataset.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let t = std::time::Instant::now();
        let raw: Vec<Entry> = file::read_json(path)?;
        let ds = Self::from_entries(raw);
        if ds.is_empty() {
            tracing::warn!(path = %path.display(), "dataset has no rows; every query will answer empty or not found");
        }
        tracing::info!(path = %path.display(), rows = ds.len(), elapsed = ?t.elapsed(), "dataset loaded");
        Ok(ds)
    }

    /// Normalize links (once) and drop rows that cannot be categorized.
    pub fn from_entries(raw: Vec<Entry>) -> Self {
        let mut dropped = 0usize;
        let entries: Vec<Entry> = raw
            .into_iter()
            .filter_map(|mut e| {
                if e.activity.category.trim().is_empty() {
                    dropped += 1;
                    return None;
                }
                e.activity.link = e
                    .activity
                    .link
                    .take()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| link::normalize(&l));
                Some(e)
            })
            .collect();

        if dropped > 0 {
            tracing::warn!(dropped, "rows without a category were not loaded");
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, i: usize) -> Option<&Entry> {
        self.entries.get(i)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, Dossier};

    fn entry(category: &str, link: Option<&str>) -> Entry {
        Entry {
            activity: Activity {
                category: s!(category),
                link: link.map(String::from),
                ..Activity::default()
            },
            dossier: Dossier::with_id("1"),
        }
    }

    #[test]
    fn links_are_normalized_and_blanks_cleared() {
        let ds = Dataset::from_entries(vec![
            entry("a", Some("/fr/doc/x y.pdf")),
            entry("a", Some("  ")),
            entry("a", None),
            entry("a", Some("garbage link")),
        ]);
        let links: Vec<Option<&str>> = ds.entries().iter().map(|e| e.activity.link.as_deref()).collect();
        assert_eq!(
            links,
            vec![Some("https://www.chd.lu/fr/doc/x%20y.pdf"), None, None, Some("garbage link")]
        );
    }

    #[test]
    fn uncategorized_rows_are_dropped() {
        let ds = Dataset::from_entries(vec![entry("a", None), entry("", None), entry(" ", None), entry("b", None)]);
        assert_eq!(ds.len(), 2);
        assert!(ds.entries().iter().all(|e| !e.activity.category.is_empty()));
    }

    #[test]
    fn empty_array_loads_as_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        std::fs::write(&path, "[]").unwrap();
        let ds = Dataset::load(&path).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
    }

    #[test]
    fn missing_and_corrupt_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Dataset::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, LoadError::Read { .. }));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"[{"date": "x"}"#).unwrap();
        assert!(matches!(Dataset::load(&bad).unwrap_err(), LoadError::Decode { .. }));

        // structurally wrong: object instead of array
        std::fs::write(&bad, r#"{"dossier_id": "1"}"#).unwrap();
        assert!(matches!(Dataset::load(&bad).unwrap_err(), LoadError::Decode { .. }));
    }
}
