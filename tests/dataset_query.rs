// tests/dataset_query.rs
//
// Load a dataset file from disk, index it, query it.
//
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chd_activities::error::{LoadError, QueryError};
use chd_activities::query::{Catalog, QueryService};

const DATASET: &str = r#"[
  {"date": "01.02.2024", "type": "Dépôt", "description": "Ministre des Finances",
   "link": "/fr/document/1 a.pdf",
   "category": "budget", "category_pretty": "Budget",
   "dossier_id": "123", "dossier_name": "Budget de l'État 2024", "dossier_status": "Publié",
   "dossier_authors": "Gilles Roth", "dossier_content": "Budget"},
  {"date": "02.02.2024", "type": "Avis", "description": "Conseil d'État",
   "category": "budget", "category_pretty": "Budget",
   "dossier_id": "124", "dossier_name": "Loi de programmation", "dossier_status": "En cours",
   "dossier_authors": "", "dossier_content": ""},
  {"date": "03.02.2024", "type": "Rapport", "description": "Commission de la Santé",
   "link": "",
   "category": "health", "category_pretty": "Health",
   "dossier_id": "123", "dossier_name": "Budget de l'État 2024", "dossier_status": "Publié",
   "dossier_authors": "Gilles Roth", "dossier_content": "Budget"}
]"#;

fn write_dataset(body: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activities.json");
    fs::write(&path, body).unwrap();
    (dir, path)
}

fn service(path: &std::path::Path) -> QueryService {
    QueryService::new(Arc::new(Catalog::open(path).unwrap()), "http://localhost:8080")
}

#[test]
fn category_summary_in_first_seen_order() {
    let (_dir, path) = write_dataset(DATASET);
    let svc = service(&path);

    let sums = svc.category_summary();
    let got: Vec<(&str, &str, usize)> = sums
        .iter()
        .map(|s| (s.category.as_str(), s.category_pretty.as_str(), s.count))
        .collect();
    assert_eq!(got, vec![("budget", "Budget", 2), ("health", "Health", 1)]);
}

#[test]
fn dossier_123_spans_both_categories() {
    let (_dir, path) = write_dataset(DATASET);
    let svc = service(&path);

    let d = svc.by_dossier("123").unwrap();
    assert_eq!(d.dossier.dossier_name, "Budget de l'État 2024");
    assert_eq!(d.activities.len(), 2);
    assert_eq!(d.activities[0].category, "budget");
    assert_eq!(d.activities[1].category, "health");

    let sums = svc.dossier_summary();
    assert_eq!(sums[0].dossier_id, "123");
    assert_eq!(sums[0].count, 2);
    assert_eq!(sums[1].link, "http://localhost:8080/activities/dossier/124");
}

#[test]
fn nonexistent_category_is_not_found() {
    let (_dir, path) = write_dataset(DATASET);
    let svc = service(&path);
    assert_eq!(
        svc.by_category("nonexistent").unwrap_err(),
        QueryError::CategoryNotFound("nonexistent".into())
    );
}

#[test]
fn links_normalized_on_load() {
    let (_dir, path) = write_dataset(DATASET);
    let svc = service(&path);
    let links: Vec<Option<&str>> = svc.all().iter().map(|e| e.activity.link.as_deref()).collect();
    assert_eq!(
        links,
        vec![Some("https://www.chd.lu/fr/document/1%20a.pdf"), None, None]
    );
}

#[test]
fn every_row_lands_in_exactly_one_category() {
    let (_dir, path) = write_dataset(DATASET);
    let svc = service(&path);
    let total: usize = svc.category_summary().iter().map(|s| s.count).sum();
    assert_eq!(total, svc.all().len());
    for s in svc.category_summary() {
        assert!(svc.by_category(&s.category).unwrap().iter().all(|e| e.activity.category == s.category));
    }
}

#[test]
fn missing_file_means_no_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::open(&dir.path().join("activities.json")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().contains("activities.json"));
}

#[test]
fn row_without_dossier_id_is_a_decode_error() {
    let (_dir, path) = write_dataset(r#"[{"date": "x", "category": "budget"}]"#);
    assert!(matches!(Catalog::open(&path).unwrap_err(), LoadError::Decode { .. }));
}
