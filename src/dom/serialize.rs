//! Render a mutated tree back to HTML text.

use super::tree::{Dom, NodeData, NodeId};

/// Elements with no closing tag and no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize the whole tree to HTML.
pub fn serialize(dom: &Dom) -> String {
    let mut out = String::new();
    for child in dom.children(dom.document()) {
        write_node(dom, child, &mut out, false);
    }
    out
}

/// Serialize and apply the extended entity substitution pass.
pub fn render(dom: &Dom) -> String {
    crate::entities::substitute(&serialize(dom))
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String, raw_text: bool) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, out, false);
            }
        }
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            if !public_id.is_empty() {
                out.push_str(" PUBLIC \"");
                out.push_str(public_id);
                out.push('"');
                if !system_id.is_empty() {
                    out.push_str(" \"");
                    out.push_str(system_id);
                    out.push('"');
                }
            } else if !system_id.is_empty() {
                out.push_str(" SYSTEM \"");
                out.push_str(system_id);
                out.push('"');
            }
            out.push('>');
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();

            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                escape_attr(&attr.value, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, out, raw);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    #[test]
    fn round_trips_simple_document() {
        let html = serialize(&parse(
            b"<!DOCTYPE html><html><head></head><body><p>Hello</p></body></html>",
        ));
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head></head><body><p>Hello</p></body></html>"
        );
    }

    #[test]
    fn reserializing_output_is_stable() {
        let first = serialize(&parse(b"<div><p>one</p><p>two</p></div>"));
        let second = serialize(&parse(first.as_bytes()));
        assert_eq!(first, second);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let html = serialize(&parse(br#"<p title="a &quot;b&quot;">x &amp; y < z</p>"#));
        assert!(html.contains(r#"title="a &quot;b&quot;""#));
        assert!(html.contains("x &amp; y &lt; z"));
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = serialize(&parse(br#"<p>a<br>b<img src="x.png"></p>"#));
        assert!(html.contains("<br>"));
        assert!(!html.contains("</br>"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn script_content_is_not_escaped() {
        let html = serialize(&parse(b"<script>if (a < b && c > d) {}</script>"));
        assert!(html.contains("<script>if (a < b && c > d) {}</script>"));
    }

    #[test]
    fn doctype_with_public_id() {
        let html = serialize(&parse(
            br#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd"><html></html>"#,
        ));
        assert!(html.starts_with(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
        ));
    }
}
