// src/config/consts.rs

// Source site
pub const SITE_ORIGIN: &str = "https://www.chd.lu";
pub const DOSSIER_PATH: &str = "/en/dossier/";
pub const USER_AGENT: &str = concat!("chd_activities/", env!("CARGO_PKG_VERSION"));

// Extraction
pub const REQUEST_TIMEOUT_SECS: u64 = 20;
pub const REQUEST_PAUSE_MS: u64 = 500; // be polite
pub const DEFAULT_DOSSIER_LIST: &str = "dossiers.json";
pub const DEFAULT_SCRAPE_DIR: &str = "scrape";
pub const MAX_ID_RANGE: u64 = 10_000; // ids per `--ids` range
pub const DEFAULT_CATEGORY: &str = "uncategorized";
pub const DEFAULT_CATEGORY_PRETTY: &str = "Uncategorized";

// Dataset
pub const ACTIVITY_FILE_ENV: &str = "ACTIVITY_FILE";
pub const DEFAULT_ACTIVITY_FILE: &str = "data/activities.json";

// Read API
pub const LISTEN_ADDR_ENV: &str = "LISTEN_ADDR";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const PUBLIC_BASE_ENV: &str = "PUBLIC_BASE_URL";
pub const DEFAULT_PUBLIC_BASE: &str = "http://localhost:8080";
pub const CATEGORY_ROUTE: &str = "/activities/category/";
pub const DOSSIER_ROUTE: &str = "/activities/dossier/";
