//! The selector-transform-anchor engine.
//!
//! One [`Engine`] lives for a whole build and carries the run-scoped anchor
//! counter; each document passes through [`Engine::process`] exactly once.
//! For every configured rule, transforms run in declared order as
//! independent passes: the full match set is materialized before any
//! insertion, each surviving node yields a [`Reference`], and the matched
//! location is made addressable before the tree is handed to the serializer.

pub mod anchor;
pub mod rewrite;

pub use anchor::{AUTOLINK_CLASS, AnchorCounter, TOC_CLASS};
pub use rewrite::rewrite_links;

use crate::config::Config;
use crate::dom::{self, Dom};

/// A discovered symbol destined for the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub entry_type: String,
    /// `documentPath#anchor`.
    pub href: String,
}

/// One document being processed: its path relative to the source root
/// (forward slashes) and its exclusively owned tree.
pub struct Document {
    pub path: String,
    pub dom: Dom,
}

impl Document {
    /// Parse HTML bytes into a processable document.
    pub fn parse(path: impl Into<String>, html: &[u8]) -> Self {
        Self {
            path: path.into(),
            dom: dom::parse(html),
        }
    }
}

/// Run-scoped extraction state.
pub struct Engine<'a> {
    config: &'a Config,
    counter: AnchorCounter,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            counter: AnchorCounter::new(),
        }
    }

    /// Match, transform, anchor, and rewrite one document in place.
    /// Returns the discovered references in emission order.
    pub fn process(&mut self, doc: &mut Document) -> Vec<Reference> {
        let refs = self.extract(doc);
        rewrite_links(&mut doc.dom, self.config.source_depth);
        refs
    }

    fn extract(&mut self, doc: &mut Document) -> Vec<Reference> {
        // Reborrow so the counter can be taken mutably inside the loop.
        let config = self.config;
        let mut refs = Vec::new();

        for rule in &config.rules {
            for transform in &rule.transforms {
                if let Some(guard) = &transform.match_path
                    && !guard.is_match(&doc.path)
                {
                    continue;
                }

                // Snapshot the match set before touching the tree: anchor
                // insertion must not perturb this pass.
                let matches = dom::select_all(&doc.dom, &rule.selectors);

                for node in matches {
                    let text = doc.dom.collect_text(node);

                    if let Some(guard) = &transform.require_text
                        && !guard.is_match(&text)
                    {
                        continue;
                    }

                    let mut name = match &transform.attribute {
                        Some(attr) => doc.dom.attr(node, attr).unwrap_or_default().to_string(),
                        None => text,
                    };

                    if config.ignore.contains(&name) {
                        continue;
                    }

                    if let Some(regexp) = &transform.regexp {
                        name = regexp
                            .replace_all(&name, transform.replacement.as_str())
                            .into_owned();
                    }

                    let fragment = anchor::ensure_anchor(&mut doc.dom, node, &mut self.counter);
                    refs.push(Reference {
                        name: name.clone(),
                        entry_type: transform.entry_type.clone(),
                        href: format!("{}#{}", doc.path, fragment),
                    });
                    anchor::insert_toc_anchor(&mut doc.dom, node, &name, &transform.entry_type);
                }
            }
        }

        refs
    }
}
