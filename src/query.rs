// src/query.rs
use std::{path::Path, sync::Arc};

use crate::{
    config::consts::{CATEGORY_ROUTE, DOSSIER_ROUTE},
    error::{LoadError, QueryError},
    index::Index,
    link,
    model::{CategorySummary, DossierActivities, DossierSummary, Entry},
    store::Dataset,
};

/// A dataset and the index built from it. Constructed once, never mutated;
/// share it behind an `Arc`.
#[derive(Debug)]
pub struct Catalog {
    dataset: Dataset,
    index: Index,
}

impl Catalog {
    pub fn new(dataset: Dataset) -> Self {
        let index = Index::build(&dataset);
        Self { dataset, index }
    }

    /// Load + index in one blocking step. Nothing is reachable until it returns.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        Dataset::load(path).map(Self::new)
    }

    fn rows<'a>(&'a self, positions: &'a [usize]) -> impl Iterator<Item = &'a Entry> + 'a {
        positions.iter().filter_map(|&i| self.dataset.get(i))
    }
}

/// The five read operations. Cheap to clone; every clone reads the same catalog.
#[derive(Clone, Debug)]
pub struct QueryService {
    catalog: Arc<Catalog>,
    public_base: String,
}

impl QueryService {
    /// `public_base` prefixes the reference links in the summaries.
    pub fn new(catalog: Arc<Catalog>, public_base: &str) -> Self {
        Self {
            catalog,
            public_base: s!(public_base.trim_end_matches('/')),
        }
    }

    /// Every row, stored order.
    pub fn all(&self) -> &[Entry] {
        self.catalog.dataset.entries()
    }

    pub fn by_category(&self, key: &str) -> Result<Vec<&Entry>, QueryError> {
        let bucket = self
            .catalog
            .index
            .category(key)
            .ok_or_else(|| QueryError::CategoryNotFound(s!(key)))?;
        Ok(self.catalog.rows(&bucket.rows).collect())
    }

    pub fn by_dossier(&self, id: &str) -> Result<DossierActivities<'_>, QueryError> {
        let bucket = self
            .catalog
            .index
            .dossier(id)
            .ok_or_else(|| QueryError::DossierNotFound(s!(id)))?;
        Ok(DossierActivities {
            dossier: &bucket.dossier,
            activities: self.catalog.rows(&bucket.rows).map(|e| &e.activity).collect(),
        })
    }

    pub fn category_summary(&self) -> Vec<CategorySummary> {
        self.catalog
            .index
            .categories()
            .map(|(key, b)| CategorySummary {
                category: s!(key),
                category_pretty: b.pretty.clone(),
                link: self.reference(CATEGORY_ROUTE, key),
                count: self.catalog.index.category_count(key),
            })
            .collect()
    }

    pub fn dossier_summary(&self) -> Vec<DossierSummary> {
        self.catalog
            .index
            .dossiers()
            .map(|(id, b)| DossierSummary {
                dossier_id: s!(id),
                dossier_name: b.dossier.dossier_name.clone(),
                dossier_status: b.dossier.dossier_status.clone(),
                link: self.reference(DOSSIER_ROUTE, id),
                count: self.catalog.index.dossier_count(id),
            })
            .collect()
    }

    /// `base + route + key`, key escaped as one path segment.
    fn reference(&self, route: &str, key: &str) -> String {
        join!(&self.public_base, route, &link::escape_segment(key))
    }
}
