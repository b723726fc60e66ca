// src/core/html.rs
//! Tolerant, case-insensitive element scanning over raw HTML text.
//!
//! No DOM is built. Callers walk `<table>` → `<tbody>` → `<tr>` → `<td>` by
//! slicing, which is enough for the table pages we read and keeps going on
//! markup a strict parser would reject (missing `</td>`, unquoted attributes,
//! stray whitespace).

use super::sanitize::{normalize_entities, normalize_ws};

/// One element found by [`next_element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    /// Byte offset of `<` in the scanned string.
    pub start: usize,
    /// Byte offset just past the element (after `</tag>`, or where it was cut off).
    pub end: usize,
    /// Opening tag text, `<` through `>`.
    pub open: &'a str,
    /// Everything between the opening tag and the close.
    pub inner: &'a str,
}

impl Element<'_> {
    pub fn attr(&self, name: &str) -> Option<String> {
        attr_value(self.open, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.open, class)
    }

    /// Visible text, whitespace collapsed and trimmed.
    pub fn text(&self) -> String {
        text(self.inner)
    }
}

/// Tags whose close is often omitted; a following sibling closes them.
fn implicitly_closed(tag: &str) -> bool {
    matches!(tag, "td" | "th" | "tr" | "li" | "p")
}

/// True when `lc[at..]` starts with `pat` followed by a tag-name boundary.
fn starts_tag(lc: &str, at: usize, pat: &str) -> bool {
    if !lc[at..].starts_with(pat) {
        return false;
    }
    match lc.as_bytes().get(at + pat.len()) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

/// Find the next `pat` (already lowercase) at a tag boundary, starting at `from`.
fn find_tag(lc: &str, pat: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(pat) {
        let at = pos + rel;
        if starts_tag(lc, at, pat) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Next `<tag …>…</tag>` at or after `from`.
///
/// `tag` is matched case-insensitively and only as a whole name (`<a` never
/// matches `<abbr`). When the close tag is missing, `td`/`th`/`tr`/`li`/`p`
/// end at the next sibling of the same name; anything else runs to the end
/// of `s`.
pub fn next_element<'a>(s: &'a str, tag: &str, from: usize) -> Option<Element<'a>> {
    let lc = s.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let open_pat = join!("<", &tag);
    let close_pat = join!("</", &tag);

    let start = find_tag(&lc, &open_pat, from)?;
    let open_end = s[start..].find('>')? + start + 1;

    let close = find_tag(&lc, &close_pat, open_end);
    let sibling = if implicitly_closed(&tag) {
        find_tag(&lc, &open_pat, open_end)
    } else {
        None
    };

    let (inner_end, end) = match (close, sibling) {
        (Some(c), Some(n)) if n < c => (n, n),
        (Some(c), _) => {
            let gt = s[c..].find('>').map(|g| c + g + 1).unwrap_or(s.len());
            (c, gt)
        }
        (None, Some(n)) => (n, n),
        (None, None) => (s.len(), s.len()),
    };

    Some(Element {
        start,
        end,
        open: &s[start..open_end],
        inner: &s[open_end..inner_end],
    })
}

/// All `tag` elements in `s`, in document order.
pub fn elements<'a>(s: &'a str, tag: &str) -> Vec<Element<'a>> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(el) = next_element(s, tag, pos) {
        pos = el.end.max(el.start + 1);
        out.push(el);
    }
    out
}

/// Value of attribute `name` in an opening tag. Accepts double quotes,
/// single quotes or no quotes; entities in the value are decoded.
pub fn attr_value(open: &str, name: &str) -> Option<String> {
    let lc = open.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let bytes = lc.as_bytes();

    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&name) {
        let at = pos + rel;
        pos = at + 1;

        // must be a whole attribute name
        let before_ok = at > 0 && (bytes[at - 1].is_ascii_whitespace() || bytes[at - 1] == b'"' || bytes[at - 1] == b'\'');
        if !before_ok {
            continue;
        }
        let after = open[at + name.len()..].trim_start();
        let Some(val) = after.strip_prefix('=') else { continue };
        let val = val.trim_start();

        let raw = match val.as_bytes().first() {
            Some(q @ (b'"' | b'\'')) => {
                let q = *q as char;
                let body = &val[1..];
                &body[..body.find(q).unwrap_or(body.len())]
            }
            _ => {
                let end = val
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(val.len());
                &val[..end]
            }
        };
        return Some(normalize_entities(raw.trim()));
    }
    None
}

/// `class` token match, case-insensitive, tolerant of multi-class values.
pub fn has_class(open: &str, class: &str) -> bool {
    attr_value(open, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Block-ish tags that separate words when stripped.
fn breaks_words(tag_lc: &str) -> bool {
    let name: String = tag_lc
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    matches!(name.as_str(), "br" | "p" | "div" | "li" | "ul" | "ol" | "td" | "tr")
}

/// Remove tags. Block-level tags leave a space so words do not fuse.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut tag = s!();
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' if !in_tag => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if breaks_words(&tag.to_ascii_lowercase()) {
                    out.push(' ');
                }
            }
            _ if in_tag => tag.push(ch),
            _ => out.push(ch),
        }
    }
    out
}

/// Visible text of a fragment: tags stripped, entities decoded, whitespace
/// collapsed and trimmed.
pub fn text(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_elements_case_insensitively() {
        let doc = r#"<DIV><Table CLASS="table striped"><TR><TD>x</TD></TR></Table></DIV>"#;
        let t = next_element(doc, "table", 0).unwrap();
        assert!(t.has_class("table"));
        assert!(t.has_class("STRIPED"));
        assert_eq!(t.inner, "<TR><TD>x</TD></TR>");
        assert_eq!(&doc[t.end..], "</DIV>");
    }

    #[test]
    fn tag_prefix_is_not_a_match() {
        let doc = r#"<abbr title="x">A</abbr> <a href="/doc">Doc</a>"#;
        let a = next_element(doc, "a", 0).unwrap();
        assert_eq!(a.attr("href").as_deref(), Some("/doc"));
        assert_eq!(a.text(), "Doc");

        let doc = "<tbody-x></tbody-x><tbody><tr></tr></tbody>";
        let tb = next_element(doc, "tbody", 0).unwrap();
        assert_eq!(tb.inner, "<tr></tr>");
    }

    #[test]
    fn missing_td_close_ends_at_next_sibling() {
        let row = "<td>one<td>two</td><td>three";
        let cells: Vec<String> = elements(row, "td").iter().map(|e| e.text()).collect();
        assert_eq!(cells, vec!["one", "two", "three"]);
    }

    #[test]
    fn attribute_quoting_styles() {
        assert_eq!(attr_value(r#"<a href="/x?a=1&amp;b=2">"#, "href").as_deref(), Some("/x?a=1&b=2"));
        assert_eq!(attr_value("<a href='/y'>", "href").as_deref(), Some("/y"));
        assert_eq!(attr_value("<a href=/z target=_blank>", "href").as_deref(), Some("/z"));
        assert_eq!(attr_value("<a HREF = \"/w\">", "href").as_deref(), Some("/w"));
        assert_eq!(attr_value(r#"<a data-href="/no">"#, "href"), None);
        assert_eq!(attr_value("<a name=x>", "href"), None);
    }

    #[test]
    fn text_keeps_words_apart_across_breaks() {
        assert_eq!(text("Déposé par<br>Madame <b>X</b>&nbsp;Y"), "Déposé par Madame X Y");
        assert_eq!(text("  <div>a</div><div>b</div>  "), "a b");
        assert_eq!(text("<b>Dé</b>pôt"), "Dépôt");
        assert_eq!(text("1 &lt; 2"), "1 < 2");
    }
}
