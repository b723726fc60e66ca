// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::link;

/// Settings for one extraction batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Scheme + host prepended to `DOSSIER_PATH` and to root-relative links.
    pub origin: String,
    pub timeout: Duration,
    /// Sleep between two dossier requests.
    pub pause: Duration,
    /// Where `<dossier id>.json` files land.
    pub out_dir: PathBuf,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            origin: s!(SITE_ORIGIN),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            out_dir: PathBuf::from(DEFAULT_SCRAPE_DIR),
        }
    }
}

impl ScrapeOptions {
    /// The id is escaped as one path segment.
    pub fn dossier_url(&self, dossier_id: &str) -> String {
        join!(self.origin.trim_end_matches('/'), DOSSIER_PATH, &link::escape_segment(dossier_id))
    }
}

/// Settings for the read API process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeOptions {
    pub activity_file: PathBuf,
    pub listen: String,
    /// Base address used to build summary links.
    pub public_base: String,
}
