// src/index.rs
//! Derived lookups over a loaded [`Dataset`].
//!
//! Buckets hold positions into the dataset, not copies. Keys keep first-seen
//! order and every bucket keeps dataset order, so answers are deterministic
//! for a given file. Counts are bucket lengths.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::Dossier;
use crate::store::Dataset;

#[derive(Debug)]
pub struct CategoryBucket {
    /// Display label from the first row of this category.
    pub pretty: String,
    pub rows: Vec<usize>,
}

#[derive(Debug)]
pub struct DossierBucket {
    /// Header from the first row of this dossier.
    pub dossier: Dossier,
    pub rows: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct Index {
    categories: IndexMap<String, CategoryBucket>,
    dossiers: IndexMap<String, DossierBucket>,
}

impl Index {
    /// One pass over `ds`. Conflicting dossier metadata or category labels
    /// for an existing key are reported once and ignored (first seen wins).
    pub fn build(ds: &Dataset) -> Self {
        let mut categories: IndexMap<String, CategoryBucket> = IndexMap::new();
        let mut dossiers: IndexMap<String, DossierBucket> = IndexMap::new();
        let mut warned: HashSet<String> = HashSet::new();

        for (i, e) in ds.entries().iter().enumerate() {
            let a = &e.activity;
            let cat = categories
                .entry(a.category.clone())
                .or_insert_with(|| CategoryBucket { pretty: a.category_pretty.clone(), rows: Vec::new() });
            if cat.pretty != a.category_pretty && warned.insert(join!("c:", &a.category)) {
                tracing::warn!(
                    category = %a.category,
                    kept = %cat.pretty,
                    ignored = %a.category_pretty,
                    "category label differs between rows"
                );
            }
            cat.rows.push(i);

            let d = &e.dossier;
            let bucket = dossiers
                .entry(d.dossier_id.clone())
                .or_insert_with(|| DossierBucket { dossier: d.clone(), rows: Vec::new() });
            if bucket.dossier != *d && warned.insert(join!("d:", &d.dossier_id)) {
                tracing::warn!(
                    dossier_id = %d.dossier_id,
                    row = i,
                    "dossier metadata differs between rows; keeping first"
                );
            }
            bucket.rows.push(i);
        }

        tracing::debug!(categories = categories.len(), dossiers = dossiers.len(), "index built");
        Self { categories, dossiers }
    }

    pub fn category(&self, key: &str) -> Option<&CategoryBucket> {
        self.categories.get(key)
    }

    pub fn dossier(&self, id: &str) -> Option<&DossierBucket> {
        self.dossiers.get(id)
    }

    pub fn category_count(&self, key: &str) -> usize {
        self.categories.get(key).map_or(0, |b| b.rows.len())
    }

    pub fn dossier_count(&self, id: &str) -> usize {
        self.dossiers.get(id).map_or(0, |b| b.rows.len())
    }

    /// First-seen order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryBucket)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First-seen order.
    pub fn dossiers(&self) -> impl Iterator<Item = (&str, &DossierBucket)> {
        self.dossiers.iter().map(|(k, v)| (k.as_str(), v))
    }
}
