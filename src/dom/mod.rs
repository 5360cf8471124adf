//! HTML documents as arena-backed trees: parsing, selector matching,
//! in-place mutation, and serialization.

mod select;
mod serialize;
mod sink;
mod tree;

pub use select::{DocSelectors, ElementRef, SelectorGroup, compile, select_all};
pub use serialize::{render, serialize};
pub use tree::{Attr, Children, Descendants, Dom, Node, NodeData, NodeId};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse HTML bytes into a [`Dom`]. Never fails: malformed input degrades
/// the way it would in a browser.
pub fn parse(html: &[u8]) -> Dom {
    let sink = sink::DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html)
        .into_dom()
}
