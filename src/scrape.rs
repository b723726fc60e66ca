// src/scrape.rs
use std::{path::{Path, PathBuf}, thread};

use crate::{
    config::options::ScrapeOptions,
    core::PageSource,
    error::{ExtractError, LoadError},
    file,
    model::{Activity, ActivityRecord, DossierSpec},
    progress::Progress,
    specs::dossier::{self, ActivityRow},
};

/// Read the batch input: a JSON array of ids or dossier objects.
pub fn load_dossier_list(path: &Path) -> Result<Vec<DossierSpec>, LoadError> {
    file::read_json(path)
}

/// Fetch and parse one dossier. Rows keep page order and carry the
/// category from `spec`.
pub fn collect_dossier(
    source: &dyn PageSource,
    spec: &DossierSpec,
    origin: &str,
) -> Result<Vec<ActivityRecord>, ExtractError> {
    let doc = source.dossier_page(spec.id())?;
    let t = std::time::Instant::now();
    let rows = dossier::parse_doc(spec.id(), &doc, origin)?;
    tracing::debug!(dossier_id = spec.id(), rows = rows.len(), elapsed = ?t.elapsed(), "parsed dossier page");

    Ok(rows
        .into_iter()
        .map(|row| ActivityRecord {
            dossier_id: s!(spec.id()),
            activity: to_activity(row, spec),
        })
        .collect())
}

fn to_activity(row: ActivityRow, spec: &DossierSpec) -> Activity {
    Activity {
        date: row.date,
        kind: row.kind,
        description: row.description,
        link: row.link,
        category: spec.category.clone(),
        category_pretty: spec.category_pretty.clone(),
    }
}

/// What one batch run produced.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    /// Scraped fine but had no activities; no file written.
    pub empty: Vec<String>,
    /// `(dossier id, reason)` for dossiers skipped after an error.
    pub failed: Vec<(String, String)>,
}

/// Scrape every dossier in `specs`, one at a time, writing one file per
/// dossier that has activities. A failing dossier is logged and skipped;
/// the batch always runs to the end.
pub fn run_batch(
    source: &dyn PageSource,
    specs: &[DossierSpec],
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(specs.len());
    }

    for (i, spec) in specs.iter().enumerate() {
        if i > 0 && !opts.pause.is_zero() {
            thread::sleep(opts.pause); // be polite
        }

        let id = spec.id();
        let outcome = collect_dossier(source, spec, &opts.origin)
            .map_err(|e| e.to_string())
            .and_then(|records| {
                if records.is_empty() {
                    return Ok(None);
                }
                let entries = spec.entries(records);
                file::write_dossier_file(&opts.out_dir, id, &entries)
                    .map(|path| Some((path, entries.len())))
                    .map_err(|e| e.to_string())
            });

        match outcome {
            Ok(Some((path, n))) => {
                summary.written.push(path);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(id, n);
                }
            }
            Ok(None) => {
                summary.empty.push(s!(id));
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(id, 0);
                }
            }
            Err(msg) => {
                tracing::error!(dossier_id = id, "{msg}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(id, &msg);
                }
                summary.failed.push((s!(id), msg));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    summary
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::file::read_entries;
    use crate::progress::NullProgress;

    /// Canned pages keyed by id; unknown ids answer 404.
    struct FakeSource(HashMap<&'static str, &'static str>);

    impl PageSource for FakeSource {
        fn dossier_page(&self, dossier_id: &str) -> Result<String, ExtractError> {
            self.0.get(dossier_id).map(|s| s!(*s)).ok_or_else(|| ExtractError::Retrieval {
                dossier_id: s!(dossier_id),
                status: 404,
            })
        }
    }

    const PAGE_TWO_ROWS: &str = r#"<table class="table"><tbody>
        <tr><td>01.02.2024</td><td>Dépôt</td><td>Ministre</td><td><a href="/doc/1">d</a></td></tr>
        <tr><td>03.04.2024</td><td>Avis</td><td>Conseil d'État</td></tr>
    </tbody></table>"#;
    const PAGE_EMPTY: &str = r#"<table class="table"><tbody><tr><td>only</td></tr></tbody></table>"#;

    fn opts(dir: &Path) -> ScrapeOptions {
        ScrapeOptions {
            pause: Duration::ZERO,
            out_dir: dir.to_path_buf(),
            ..ScrapeOptions::default()
        }
    }

    #[test]
    fn one_bad_dossier_never_aborts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource(HashMap::from([("100", PAGE_TWO_ROWS), ("102", PAGE_EMPTY)]));
        let specs: Vec<DossierSpec> = serde_json::from_str(
            r#"["101", {"dossier_id": "100", "dossier_name": "Budget", "category": "budget", "category_pretty": "Budget"}, "102"]"#,
        )
        .unwrap();

        let mut progress = NullProgress;
        let summary = run_batch(&source, &specs, &opts(dir.path()), Some(&mut progress));

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "101");
        assert!(summary.failed[0].1.contains("404"));
        assert_eq!(summary.empty, vec![s!("102")]);
        assert_eq!(summary.written, vec![dir.path().join("100.json")]);
        assert!(!dir.path().join("102.json").exists());

        let rows = read_entries(&summary.written[0]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].activity.category, "budget");
        assert_eq!(rows[0].activity.link.as_deref(), Some("https://www.chd.lu/doc/1"));
        assert_eq!(rows[1].activity.link, None);
        assert_eq!(rows[1].dossier.dossier_name, "Budget");
    }

    #[test]
    fn collect_keeps_page_order_and_default_category() {
        let source = FakeSource(HashMap::from([("7", PAGE_TWO_ROWS)]));
        let recs = collect_dossier(&source, &DossierSpec::bare("7"), "https://www.chd.lu").unwrap();
        let dates: Vec<&str> = recs.iter().map(|r| r.activity.date.as_str()).collect();
        assert_eq!(dates, vec!["01.02.2024", "03.04.2024"]);
        assert!(recs.iter().all(|r| r.dossier_id == "7" && r.activity.category == "uncategorized"));
    }

    #[test]
    fn look_alike_ids_get_their_own_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource(HashMap::from([("7842/01", PAGE_TWO_ROWS), ("7842_01", PAGE_TWO_ROWS)]));
        let specs = vec![DossierSpec::bare("7842/01"), DossierSpec::bare("7842_01")];

        let summary = run_batch(&source, &specs, &opts(dir.path()), None);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.written.len(), 2);
        assert_ne!(summary.written[0], summary.written[1]);
        assert!(summary.written.iter().all(|p| p.is_file()));

        let out = dir.path().join("merged").join("activities.json");
        let merged = file::merge_dossier_files(dir.path(), Some(&specs), &out).unwrap();
        assert_eq!(merged.files, 2);
        assert!(merged.missing.is_empty());
        let ids: Vec<String> = read_entries(&out).unwrap().into_iter().map(|e| e.dossier.dossier_id).collect();
        assert_eq!(ids, vec!["7842/01", "7842/01", "7842_01", "7842_01"]);
    }

    #[test]
    fn missing_list_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dossier_list(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
