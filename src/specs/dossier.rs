// src/specs/dossier.rs
//! Scraping *spec* for one dossier page (`/en/dossier/<id>`).
//!
//! Ground truth lives in the activity table: the first `<table>` carrying the
//! `table` class, its `<tbody>`, one `<tr>` per activity. Cells are read by
//! the named offsets below; nothing else about the page layout is assumed.
//!
//! | offset | column            | field         |
//! |--------|-------------------|---------------|
//! | 0      | date              | `date`        |
//! | 1      | entry label       | `type`        |
//! | 2      | actor / detail    | `description` |
//! | 3      | document (anchor) | `link`        |
//!
//! Rows shorter than [`MIN_COLUMNS`] are layout noise (headers, spacers) and
//! are skipped. A missing link column, or one without an anchor, is just an
//! activity without a link.

use crate::core::html::{self, Element};
use crate::error::ExtractError;
use crate::link;

pub const COL_DATE: usize = 0;
pub const COL_TYPE: usize = 1;
pub const COL_DESCRIPTION: usize = 2;
pub const COL_LINK: usize = 3;
pub const MIN_COLUMNS: usize = 3;

/// Class token identifying the activity table.
pub const TABLE_CLASS: &str = "table";

/// One table row, before category/dossier context is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityRow {
    pub date: String,
    pub kind: String,
    pub description: String,
    pub link: Option<String>,
}

/// Parse a fetched page. `origin` resolves root-relative links.
///
/// A page without the activity table is a dossier with no activities (empty
/// vec). Only a body that is not markup at all is an error.
pub fn parse_doc(dossier_id: &str, doc: &str, origin: &str) -> Result<Vec<ActivityRow>, ExtractError> {
    if !looks_like_markup(doc) {
        return Err(ExtractError::Parse {
            dossier_id: s!(dossier_id),
            reason: s!("response body contains no markup"),
        });
    }

    let Some(table) = find_activity_table(doc) else {
        tracing::debug!(dossier_id, "no activity table on page");
        return Ok(Vec::new());
    };

    // Prefer <tbody>; pages without one keep rows directly under <table>.
    let body = html::next_element(table.inner, "tbody", 0)
        .map(|tb| tb.inner)
        .unwrap_or(table.inner);

    let rows = html::elements(body, "tr")
        .into_iter()
        .filter_map(|tr| parse_row(&tr, origin))
        .collect();
    Ok(rows)
}

fn looks_like_markup(doc: &str) -> bool {
    let t = doc.trim_start();
    !t.is_empty() && t.contains('<') && t.contains('>')
}

fn find_activity_table(doc: &str) -> Option<Element<'_>> {
    let mut pos = 0usize;
    while let Some(t) = html::next_element(doc, "table", pos) {
        if t.has_class(TABLE_CLASS) {
            return Some(t);
        }
        pos = t.end.max(t.start + 1);
    }
    None
}

fn parse_row(tr: &Element<'_>, origin: &str) -> Option<ActivityRow> {
    let cells = html::elements(tr.inner, "td");
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    let link = cells
        .get(COL_LINK)
        .and_then(|cell| html::next_element(cell.inner, "a", 0))
        .and_then(|a| a.attr("href"))
        .filter(|href| !href.is_empty())
        .map(|href| link::normalize_with_origin(&href, origin));

    Some(ActivityRow {
        date: cells[COL_DATE].text(),
        kind: cells[COL_TYPE].text(),
        description: cells[COL_DESCRIPTION].text(),
        link,
    })
}
