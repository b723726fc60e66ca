// src/core/sanitize.rs
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// Named entities seen on the source pages (French text, typographic quotes).
const NAMED: &[(&str, char)] = &[
    ("nbsp", ' '),
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("laquo", '«'),
    ("raquo", '»'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("hellip", '…'),
    ("euro", '€'),
    ("deg", '°'),
    ("agrave", 'à'),
    ("acirc", 'â'),
    ("auml", 'ä'),
    ("ccedil", 'ç'),
    ("eacute", 'é'),
    ("egrave", 'è'),
    ("ecirc", 'ê'),
    ("euml", 'ë'),
    ("icirc", 'î'),
    ("iuml", 'ï'),
    ("ocirc", 'ô'),
    ("ouml", 'ö'),
    ("ugrave", 'ù'),
    ("ucirc", 'û'),
    ("uuml", 'ü'),
    ("Eacute", 'É'),
    ("Egrave", 'È'),
    ("Agrave", 'À'),
];

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    NAMED.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

/// Decode `&name;`, `&#NNN;` and `&#xHH;`. Unknown or unterminated
/// entities are left as written.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let semi = tail
            .char_indices()
            .take(10)
            .find(|(_, c)| *c == ';')
            .map(|(i, _)| i);

        match semi.and_then(|i| decode_entity(&tail[..i]).map(|c| (i, c))) {
            Some((i, ch)) => {
                out.push(ch);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs (including no-break spaces) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Escaped in a file stem: everything except ASCII alphanumerics, `-` and `_`.
const FILE_STEM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Stem standing in for the empty id. Escaping never yields a bare `%`.
const EMPTY_STEM: &str = "%";

/// File stem for a dossier id, percent-escaped so that distinct ids never
/// share a file name. [`id_from_file_stem`] reverses it.
pub fn dossier_file_stem(id: &str) -> String {
    if id.is_empty() {
        return s!(EMPTY_STEM);
    }
    percent_encode(id.as_bytes(), FILE_STEM).to_string()
}

pub fn id_from_file_stem(stem: &str) -> String {
    if stem == EMPTY_STEM {
        return s!();
    }
    percent_decode_str(stem).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_named_and_numeric() {
        assert_eq!(normalize_entities("Conseil d&#39;&Eacute;tat"), "Conseil d'État");
        assert_eq!(normalize_entities("&#xE9;t&eacute;"), "été");
        assert_eq!(normalize_entities("a&nbsp;&amp;&nbsp;b"), "a & b");
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(normalize_entities("R&D"), "R&D");
        assert_eq!(normalize_entities("&bogus; &"), "&bogus; &");
    }

    #[test]
    fn file_stems_keep_ids_apart() {
        assert_eq!(dossier_file_stem("7842"), "7842");
        assert_eq!(dossier_file_stem("7842_01"), "7842_01");
        assert_eq!(dossier_file_stem("7842/01"), "7842%2F01");
        assert_eq!(dossier_file_stem("../.."), "%2E%2E%2F%2E%2E");
        assert_eq!(dossier_file_stem(""), "%");
    }

    #[test]
    fn file_stems_reverse_to_the_id() {
        for id in ["7842", "7842/01", "7842_01", " 12 ", "santé", "a%2Fb", "", "%"] {
            assert_eq!(id_from_file_stem(&dossier_file_stem(id)), id);
        }
    }
}
