//! Fragment anchors for matched nodes.
//!
//! Every matched node must be addressable by `#fragment`. A matched `<a>`
//! that already carries a `name` attribute is reused as-is; anything else
//! gets a synthesized anchor inserted immediately before it. A second,
//! always-inserted anchor carries the browser's table-of-contents deep link.

use html5ever::{LocalName, QualName, ns};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::dom::{Attr, Dom, NodeId};

/// Class marking anchors synthesized for addressability.
pub const AUTOLINK_CLASS: &str = "dashingAutolink";
/// Class marking table-of-contents deep-link anchors.
pub const TOC_CLASS: &str = "dashAnchor";

/// Query-style escaping with space as `%20`: everything outside
/// `[A-Za-z0-9_.~-]` is percent-encoded.
const NAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Run-scoped anchor allocator. One instance lives for a whole build, so
/// synthesized names are unique across every document in the run.
#[derive(Debug, Default)]
pub struct AnchorCounter {
    next: u64,
}

impl AnchorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        format!("autolink-{n}")
    }
}

/// Return a fragment name addressing `node`, synthesizing and inserting an
/// anchor element when the node cannot be addressed directly.
pub fn ensure_anchor(dom: &mut Dom, node: NodeId, counter: &mut AnchorCounter) -> String {
    if dom.element_name(node).is_some_and(|n| n.as_ref() == "a")
        && let Some(existing) = dom.attr(node, "name")
    {
        return existing.to_string();
    }

    let target = counter.mint();
    let link = make_anchor(dom, AUTOLINK_CLASS, &target);
    dom.insert_before(node, link);
    target
}

/// Insert the TOC deep-link anchor for a discovered symbol before `node`.
pub fn insert_toc_anchor(dom: &mut Dom, node: NodeId, name: &str, entry_type: &str) {
    let escaped = utf8_percent_encode(name, NAME_ESCAPE).to_string();
    let target = format!("//apple_ref/cpp/{entry_type}/{escaped}");
    let link = make_anchor(dom, TOC_CLASS, &target);
    dom.insert_before(node, link);
}

fn make_anchor(dom: &mut Dom, class: &str, name: &str) -> NodeId {
    let attrs = vec![
        Attr {
            name: QualName::new(None, ns!(), LocalName::from("class")),
            value: class.to_string(),
        },
        Attr {
            name: QualName::new(None, ns!(), LocalName::from("name")),
            value: name.to_string(),
        },
    ];
    dom.create_element(QualName::new(None, ns!(html), LocalName::from("a")), attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{self, select_all};

    fn first_match(dom: &Dom, pattern: &str) -> NodeId {
        let group = dom::compile(pattern).unwrap();
        select_all(dom, &group)[0]
    }

    #[test]
    fn counter_is_monotonic_and_never_resets() {
        let mut counter = AnchorCounter::new();
        let mut dom = dom::parse(b"<h1>one</h1><h2>two</h2>");

        let h1 = first_match(&dom, "h1");
        let h2 = first_match(&dom, "h2");
        assert_eq!(ensure_anchor(&mut dom, h1, &mut counter), "autolink-0");
        assert_eq!(ensure_anchor(&mut dom, h2, &mut counter), "autolink-1");

        // A second document in the same run keeps counting.
        let mut other = dom::parse(b"<h1>three</h1>");
        let h1 = first_match(&other, "h1");
        assert_eq!(ensure_anchor(&mut other, h1, &mut counter), "autolink-2");
    }

    #[test]
    fn named_anchor_nodes_are_reused_verbatim() {
        let mut counter = AnchorCounter::new();
        let mut dom = dom::parse(br#"<a name="section-3">Section</a>"#);

        let a = first_match(&dom, "a");
        let before = dom.len();
        assert_eq!(ensure_anchor(&mut dom, a, &mut counter), "section-3");
        // No insertion, no counter consumption.
        assert_eq!(dom.len(), before);
        assert_eq!(counter.next, 0);
    }

    #[test]
    fn synthesized_anchor_precedes_the_node() {
        let mut counter = AnchorCounter::new();
        let mut dom = dom::parse(b"<h1>Title</h1>");

        let h1 = first_match(&dom, "h1");
        ensure_anchor(&mut dom, h1, &mut counter);

        let prev = dom.get(h1).unwrap().prev_sibling;
        assert_eq!(dom.attr(prev, "name"), Some("autolink-0"));
        assert_eq!(dom.attr(prev, "class"), Some(AUTOLINK_CLASS));
    }

    #[test]
    fn toc_anchor_escapes_the_symbol_name() {
        let mut dom = dom::parse(b"<h1>Getting Started</h1>");
        let h1 = first_match(&dom, "h1");

        insert_toc_anchor(&mut dom, h1, "Getting Started", "Guide");
        let prev = dom.get(h1).unwrap().prev_sibling;
        assert_eq!(
            dom.attr(prev, "name"),
            Some("//apple_ref/cpp/Guide/Getting%20Started")
        );
        assert_eq!(dom.attr(prev, "class"), Some(TOC_CLASS));
    }

    #[test]
    fn escaping_keeps_unreserved_characters() {
        let mut dom = dom::parse(b"<h1>x</h1>");
        let h1 = first_match(&dom, "h1");

        insert_toc_anchor(&mut dom, h1, "vec.sort_by~2-x", "Method");
        let prev = dom.get(h1).unwrap().prev_sibling;
        assert_eq!(
            dom.attr(prev, "name"),
            Some("//apple_ref/cpp/Method/vec.sort_by~2-x")
        );
    }
}
