//! Root-absolute link rewriting.
//!
//! A relocated bundle has no filesystem root to resolve `/css/main.css`
//! against, so root-absolute `href`/`src` values are rewritten to relative
//! form: the leading slash is dropped and the value is prefixed with one
//! `../` per level of depth beyond the configured source root. Only the
//! first `href` or `src` attribute of an element is considered; at most one
//! attribute is rewritten per element.

use crate::dom::{Dom, NodeData, NodeId};

/// Rewrite every root-absolute `href`/`src` in the tree.
pub fn rewrite_links(dom: &mut Dom, source_depth: usize) {
    let elements: Vec<NodeId> = dom
        .descendants(dom.document())
        .filter(|&id| dom.is_element(id))
        .collect();

    for id in elements {
        let Some(node) = dom.get_mut(id) else { continue };
        let NodeData::Element { attrs, .. } = &mut node.data else {
            continue;
        };

        for attr in attrs.iter_mut() {
            let local = attr.name.local.as_ref();
            if local != "href" && local != "src" {
                continue;
            }
            if let Some(relative) = attr.value.strip_prefix('/') {
                attr.value = relativize(relative, source_depth);
            }
            break;
        }
    }
}

/// Prefix `relative` with `../` once per level of depth below the source
/// root: `depth = segments - 1 - source_depth`.
fn relativize(relative: &str, source_depth: usize) -> String {
    let segments = relative.split('/').count();
    let depth = segments as isize - 1 - source_depth as isize;

    let mut value = String::with_capacity(relative.len() + 3 * depth.max(0) as usize);
    for _ in 0..depth.max(0) {
        value.push_str("../");
    }
    value.push_str(relative);
    value
}
