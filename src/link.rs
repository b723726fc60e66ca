// src/link.rs
//! Link canonicalization.
//!
//! Root-relative hrefs get the site origin, the result is parsed as a URL and
//! every path segment is re-escaped. Escaping is decode-then-encode, so running
//! it over an already escaped path reproduces the same bytes:
//! `normalize(normalize(x)) == normalize(x)`.
//!
//! Anything that does not parse is handed back untouched. A slightly odd
//! display link is better than a dropped record.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, percent_encode};
use url::Url;

use crate::config::consts::SITE_ORIGIN;

/// Escaped inside a single path segment. Unreserved characters, sub-delims,
/// `:` and `@` pass through; `%` is escaped because input is decoded first.
pub const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Normalize against the live site origin.
pub fn normalize(raw: &str) -> String {
    normalize_with_origin(raw, SITE_ORIGIN)
}

pub fn normalize_with_origin(raw: &str, origin: &str) -> String {
    let candidate = if raw.starts_with('/') {
        join!(origin.trim_end_matches('/'), raw)
    } else {
        s!(raw)
    };

    let mut url = match Url::parse(&candidate) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(link = raw, error = %e, "keeping unparseable link as-is");
            return s!(raw);
        }
    };

    // mailto:, javascript: and friends have no segments to escape
    if !url.cannot_be_a_base() {
        let escaped = escape_path(url.path());
        url.set_path(&escaped);
    }
    url.into()
}

/// Re-escape each `/`-separated segment. Separators are kept; an encoded
/// `%2F` inside a segment stays encoded.
pub fn escape_path(path: &str) -> String {
    path.split('/').map(escape_segment).collect::<Vec<_>>().join("/")
}

pub fn escape_segment(segment: &str) -> String {
    let bytes: Vec<u8> = percent_decode_str(segment).collect();
    percent_encode(&bytes, SEGMENT).to_string()
}
