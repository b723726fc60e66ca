// src/model.rs
//! Record shapes shared by extraction, the persisted files and the read API.
//!
//! Field names on the wire are lowercase with underscores. `Entry` is the flat
//! persisted row: activity fields and dossier fields side by side.

use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_CATEGORY, DEFAULT_CATEGORY_PRETTY};

/// One dated event on a dossier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Source formatted, e.g. `"12.03.2024"`. Never parsed.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_pretty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    pub dossier_id: String,
    #[serde(default)]
    pub dossier_name: String,
    #[serde(default)]
    pub dossier_status: String,
    #[serde(default)]
    pub dossier_authors: String,
    #[serde(default)]
    pub dossier_content: String,
}

impl Dossier {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { dossier_id: id.into(), ..Self::default() }
    }
}

/// Persisted composite row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(flatten)]
    pub dossier: Dossier,
}

/// Extraction-time pairing of an activity with its dossier id.
/// Lives only between parsing a page and writing its file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRecord {
    pub dossier_id: String,
    pub activity: Activity,
}

/// `by dossier` answer: dossier header once, then its activities.
#[derive(Debug, Serialize)]
pub struct DossierActivities<'a> {
    #[serde(flatten)]
    pub dossier: &'a Dossier,
    pub activities: Vec<&'a Activity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub category_pretty: String,
    pub link: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierSummary {
    pub dossier_id: String,
    pub dossier_name: String,
    pub dossier_status: String,
    pub link: String,
    pub count: usize,
}

/* ---------------- batch input ---------------- */

/// One item of the extraction batch list.
///
/// The list may hold bare ids (`"7842"` or `7842`) or objects carrying the
/// dossier metadata and the category to stamp onto its activities.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "SpecRepr")]
pub struct DossierSpec {
    pub dossier: Dossier,
    pub category: String,
    pub category_pretty: String,
}

impl DossierSpec {
    pub fn id(&self) -> &str {
        &self.dossier.dossier_id
    }

    pub fn bare(id: impl Into<String>) -> Self {
        Self::from_parts(Dossier::with_id(id), s!(), s!())
    }

    fn from_parts(dossier: Dossier, category: String, category_pretty: String) -> Self {
        let category = category.trim().to_string();
        let (category, category_pretty) = match (category.is_empty(), category_pretty.trim()) {
            (true, _) => (s!(DEFAULT_CATEGORY), s!(DEFAULT_CATEGORY_PRETTY)),
            (false, "") => (category.clone(), category),
            (false, pretty) => (category, s!(pretty)),
        };
        Self { dossier, category, category_pretty }
    }

    /// Composite rows for this dossier, in the order given.
    pub fn entries(&self, records: Vec<ActivityRecord>) -> Vec<Entry> {
        records
            .into_iter()
            .map(|r| Entry { activity: r.activity, dossier: self.dossier.clone() })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecRepr {
    Id(String),
    Number(u64),
    Described {
        #[serde(flatten)]
        dossier: Dossier,
        #[serde(default)]
        category: String,
        #[serde(default)]
        category_pretty: String,
    },
}

impl From<SpecRepr> for DossierSpec {
    fn from(repr: SpecRepr) -> Self {
        match repr {
            SpecRepr::Id(id) => DossierSpec::bare(id.trim()),
            SpecRepr::Number(n) => DossierSpec::bare(n.to_string()),
            SpecRepr::Described { dossier, category, category_pretty } => {
                DossierSpec::from_parts(dossier, category, category_pretty)
            }
        }
    }
}
