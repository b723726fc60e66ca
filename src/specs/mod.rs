// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications. Each spec owns one page shape and
//! encodes *where the ground truth lives in the HTML* and *how to read it
//! tolerantly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a fetched page body (no network, no files).
//! - **Column schemas**: named offsets and minimum widths instead of magic indices.
//! - **Tolerant extraction** through `core::html` (case-insensitive element
//!   scanning, attribute reading, entity/whitespace cleanup).
//!
//! ## What does **not** live here
//! - **Retrieval**: `core::net::PageSource`.
//! - **Category / dossier context and persistence**: `scrape` and `file`.
//!
//! ## Typical call chain
//! ```text
//! cli scrape → scrape::run_batch → scrape::collect_dossier
//!                                    ├─ PageSource::dossier_page
//!                                    └─ specs::dossier::parse_doc
//!            → file::write_dossier_file
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against inline HTML snippets; keep selectors
//! resilient to whitespace, attribute order and unclosed cells.
pub mod dossier;
