//! Tolerant HTML fragment parser backing [`Document::set_inner_html`].
//!
//! Layout partials are small hand-written markup, so this handles elements,
//! quoted/unquoted/bare attributes, void and self-closing tags, comments and
//! the common character references. Malformed input never fails: stray end
//! tags are dropped and unclosed elements end with the fragment. Script and
//! style bodies are treated as ordinary text.

use super::{Document, NodeId, VOID_TAGS};

/// Parse `html` into detached top-level nodes owned by `doc`.
pub(super) fn parse(doc: &Document, html: &str) -> Vec<NodeId> {
    let mut roots = Vec::new();
    let mut stack: Vec<(String, NodeId)> = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
        } else if let Some(after) = rest.strip_prefix("</") {
            let end = after.find('>').unwrap_or(after.len());
            let tag = after[..end].trim().to_ascii_lowercase();
            rest = after.get(end + 1..).unwrap_or("");
            if let Some(pos) = stack.iter().rposition(|(t, _)| *t == tag) {
                stack.truncate(pos);
            }
        } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
        {
            let (tag, attrs, self_closing, after) = parse_open_tag(&rest[1..]);
            rest = after;
            let el = doc.create_element(&tag);
            for (name, value) in attrs {
                doc.set_attr(el, &name, &value);
            }
            attach(doc, &stack, &mut roots, el);
            if !self_closing && !VOID_TAGS.contains(&tag.as_str()) {
                stack.push((tag, el));
            }
        } else {
            let first = rest.chars().next().map_or(1, char::len_utf8);
            let end = rest[first..].find('<').map_or(rest.len(), |i| i + first);
            let text = decode_entities(&rest[..end]);
            rest = &rest[end..];
            let node = doc.create_text(&text);
            attach(doc, &stack, &mut roots, node);
        }
    }
    roots
}

fn attach(doc: &Document, stack: &[(String, NodeId)], roots: &mut Vec<NodeId>, node: NodeId) {
    match stack.last() {
        Some((_, parent)) => doc.append(*parent, node),
        None => roots.push(node),
    }
}

/// Parse a start tag; `input` begins right after `<`. Returns the tag name,
/// attributes, whether it self-closed, and the remaining input.
fn parse_open_tag(input: &str) -> (String, Vec<(String, String)>, bool, &str) {
    let name_end = input
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(input.len());
    let tag = input[..name_end].to_ascii_lowercase();
    let mut rest = &input[name_end..];
    let mut attrs = Vec::new();

    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("/>") {
            return (tag, attrs, true, after);
        }
        if let Some(after) = rest.strip_prefix('>') {
            return (tag, attrs, false, after);
        }
        if let Some(after) = rest.strip_prefix('/') {
            rest = after;
            continue;
        }
        if rest.is_empty() {
            return (tag, attrs, false, rest);
        }

        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next().filter(|c| *c == '"' || *c == '\'') {
                    Some(quote) => {
                        let body = &after[1..];
                        let end = body.find(quote).unwrap_or(body.len());
                        rest = body.get(end + 1..).unwrap_or("");
                        decode_entities(&body[..end])
                    }
                    None => {
                        let end = after
                            .find(|c: char| c.is_whitespace() || c == '>')
                            .unwrap_or(after.len());
                        rest = &after[end..];
                        decode_entities(&after[..end])
                    }
                }
            }
            None => String::new(),
        };
        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let decoded = after
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "copy" => Some('©'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(html: &str) -> String {
        let doc = Document::new();
        doc.set_inner_html(doc.root(), html);
        doc.inner_html(doc.root())
    }

    #[test]
    fn nested_elements_and_text() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.root(),
            "<nav id=\"main-nav\"><ul><li><a href=\"/\">Home</a></li></ul></nav>",
        );
        let nav = doc.get_by_id("main-nav").unwrap();
        let a = doc.query("a").unwrap();
        assert!(doc.contains(nav, a));
        assert_eq!(doc.text(nav), "Home");
    }

    #[test]
    fn void_and_self_closing_tags_do_not_nest() {
        assert_eq!(
            roundtrip("<p>a<br>b<img src=x.png/>c</p>"),
            "<p>a<br>b<img src=\"x.png/\">c</p>"
        );
        assert_eq!(roundtrip("<span/>after"), "<span></span>after");
    }

    #[test]
    fn attribute_forms() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.root(),
            "<button class='menu-btn open' aria-expanded=false disabled data-x=\"a &amp; b\">x</button>",
        );
        let btn = doc.query("button").unwrap();
        assert!(doc.has_class(btn, "menu-btn"));
        assert!(doc.has_class(btn, "open"));
        assert_eq!(doc.attr(btn, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(doc.attr(btn, "disabled").as_deref(), Some(""));
        assert_eq!(doc.attr(btn, "data-x").as_deref(), Some("a & b"));
    }

    #[test]
    fn entities_decode_in_text() {
        let doc = Document::new();
        doc.set_inner_html(doc.root(), "<p>&copy; 2024 &#8211; A&amp;B &#x41; &bogus; &</p>");
        let p = doc.query("p").unwrap();
        assert_eq!(doc.text(p), "© 2024 – A&B A &bogus; &");
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        assert_eq!(roundtrip("<!DOCTYPE html><!-- note --><b>x</b>"), "<b>x</b>");
    }

    #[test]
    fn malformed_markup_is_tolerated() {
        assert_eq!(roundtrip("</div><p>open"), "<p>open</p>");
        assert_eq!(roundtrip("<ul><li>a</ul>tail"), "<ul><li>a</li></ul>tail");
        assert_eq!(roundtrip("1 < 2 ok"), "1 &lt; 2 ok");
        assert_eq!(roundtrip("čau <b>ň</b>"), "čau <b>ň</b>");
    }
}
