//! CSS selector matching over the arena tree.
//!
//! Implements the `selectors` crate's parser and `Element` traits for
//! [`Dom`] nodes, so configured patterns compile once at load time and match
//! against parsed documents with the same engine browsers use.

use std::fmt;

use cssparser::{Parser, ParserInput};
use html5ever::{LocalName, Namespace};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    self, ElementSelectorFlags, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags,
};
use selectors::parser::{ParseRelative, Selector, SelectorParseErrorKind};
use selectors::{OpaqueElement, SelectorImpl};

use super::tree::{Dom, NodeData, NodeId};

/// Marker type carrying the selector grammar configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSelectors;

/// A compiled selector group (the comma-separated alternatives of one
/// configured pattern).
pub type SelectorGroup = Vec<Selector<DocSelectors>>;

/// Compile a selector pattern. Returns `None` when the pattern is not valid
/// CSS selector syntax; callers turn that into a load-time error.
pub fn compile(pattern: &str) -> Option<SelectorGroup> {
    let mut input = ParserInput::new(pattern);
    let mut parser = Parser::new(&mut input);
    let list =
        selectors::parser::SelectorList::parse(&DocSelectors, &mut parser, ParseRelative::No)
            .ok()?;
    Some(list.slice().to_vec())
}

/// All elements matching any selector in the group, in document order.
///
/// The result is a fully materialized snapshot: callers may mutate the tree
/// afterwards (inserting nodes before matches) without disturbing it.
pub fn select_all(dom: &Dom, selectors: &SelectorGroup) -> Vec<NodeId> {
    let mut caches = SelectorCaches::default();
    let mut context = MatchingContext::new(
        MatchingMode::Normal,
        None,
        &mut caches,
        QuirksMode::NoQuirks,
        NeedsSelectorFlags::No,
        MatchingForInvalidation::No,
    );

    dom.descendants(dom.document())
        .filter(|&id| dom.is_element(id))
        .filter(|&id| {
            let elem = ElementRef::new(dom, id);
            selectors
                .iter()
                .any(|s| matching::matches_selector(s, 0, None, &elem, &mut context))
        })
        .collect()
}

/// Identifier string type (attribute values, ids, classes).
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct IdentStr(pub String);

impl precomputed_hash::PrecomputedHash for IdentStr {
    fn precomputed_hash(&self) -> u32 {
        let mut h: u32 = 0;
        for byte in self.0.bytes() {
            h = h.wrapping_mul(31).wrapping_add(byte as u32);
        }
        h
    }
}

impl AsRef<str> for IdentStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for IdentStr {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

impl cssparser::ToCss for IdentStr {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

/// LocalName wrapper implementing ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl precomputed_hash::PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<String> for CssLocalName {
    fn from(s: String) -> Self {
        Self(LocalName::from(s))
    }
}

impl<'a> From<&'a str> for CssLocalName {
    fn from(s: &'a str) -> Self {
        Self(LocalName::from(s))
    }
}

impl AsRef<str> for CssLocalName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

/// Namespace wrapper implementing ToCss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CssNamespace(pub Namespace);

impl precomputed_hash::PrecomputedHash for CssNamespace {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

impl cssparser::ToCss for CssNamespace {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(self.0.as_ref())
    }
}

impl From<String> for CssNamespace {
    fn from(s: String) -> Self {
        Self(Namespace::from(s))
    }
}

impl<'a> From<&'a str> for CssNamespace {
    fn from(s: &'a str) -> Self {
        Self(Namespace::from(s))
    }
}

impl<'i> selectors::parser::Parser<'i> for DocSelectors {
    type Impl = DocSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// Pseudo-elements never match static documents; the type is uninhabited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = DocSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

/// The only non-tree-structural pseudo-class with meaning in a static
/// document is `:link`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonTSPseudoClass {
    Link,
}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = DocSelectors;

    fn is_active_or_hover(&self) -> bool {
        false
    }

    fn is_user_action_state(&self) -> bool {
        false
    }
}

impl cssparser::ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        match self {
            Self::Link => dest.write_str(":link"),
        }
    }
}

impl SelectorImpl for DocSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = IdentStr;
    type Identifier = IdentStr;
    type LocalName = CssLocalName;
    type NamespaceUrl = CssNamespace;
    type NamespacePrefix = IdentStr;
    type BorrowedLocalName = CssLocalName;
    type BorrowedNamespaceUrl = CssNamespace;
    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

/// A [`Dom`] element viewed through the `selectors::Element` trait.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    pub dom: &'a Dom,
    pub id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(dom: &'a Dom, id: NodeId) -> Self {
        Self { dom, id }
    }

    fn is_link_element(&self) -> bool {
        self.dom
            .element_name(self.id)
            .is_some_and(|n| n.as_ref() == "a")
            && self.dom.attr(self.id, "href").is_some()
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.dom.element_name(self.id))
            .finish()
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = DocSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self)
    }

    fn parent_element(&self) -> Option<Self> {
        let node = self.dom.get(self.id)?;
        if node.parent.is_none() {
            return None;
        }
        if self.dom.is_element(node.parent) {
            Some(Self::new(self.dom, node.parent))
        } else {
            None
        }
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let mut current = self.dom.get(self.id)?.prev_sibling;
        while current.is_some() {
            if self.dom.is_element(current) {
                return Some(Self::new(self.dom, current));
            }
            current = self.dom.get(current)?.prev_sibling;
        }
        None
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let mut current = self.dom.get(self.id)?.next_sibling;
        while current.is_some() {
            if self.dom.is_element(current) {
                return Some(Self::new(self.dom, current));
            }
            current = self.dom.get(current)?.next_sibling;
        }
        None
    }

    fn first_element_child(&self) -> Option<Self> {
        self.dom
            .children(self.id)
            .find(|&child| self.dom.is_element(child))
            .map(|child| Self::new(self.dom, child))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.dom.element_name(self.id).is_some_and(|n| n == &name.0)
    }

    fn has_namespace(&self, ns: &CssNamespace) -> bool {
        self.dom
            .element_namespace(self.id)
            .is_some_and(|n| n == &ns.0)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.dom.element_name(self.id) == other.dom.element_name(other.id)
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssNamespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&IdentStr>,
    ) -> bool {
        let Some(node) = self.dom.get(self.id) else {
            return false;
        };
        let NodeData::Element { attrs, .. } = &node.data else {
            return false;
        };

        for attr in attrs {
            let ns_match = match ns {
                NamespaceConstraint::Any => true,
                NamespaceConstraint::Specific(ns) => attr.name.ns == ns.0,
            };
            if !ns_match || attr.name.local != local_name.0 {
                continue;
            }
            return operation.eval_str(&attr.value);
        }
        false
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match pc {
            NonTSPseudoClass::Link => self.is_link_element(),
        }
    }

    fn match_pseudo_element(
        &self,
        _pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn is_link(&self) -> bool {
        self.is_link_element()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        match self.dom.element_id(self.id) {
            Some(elem_id) => case_sensitivity.eq(elem_id.as_bytes(), id.0.as_bytes()),
            None => false,
        }
    }

    fn has_class(&self, name: &IdentStr, case_sensitivity: CaseSensitivity) -> bool {
        self.dom
            .element_classes(self.id)
            .iter()
            .any(|c| case_sensitivity.eq(c.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &IdentStr) -> Option<IdentStr> {
        None
    }

    fn is_part(&self, _name: &IdentStr) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        for child in self.dom.children(self.id) {
            let Some(node) = self.dom.get(child) else {
                continue;
            };
            match &node.data {
                NodeData::Element { .. } => return false,
                NodeData::Text(t) if !t.trim().is_empty() => return false,
                _ => {}
            }
        }
        true
    }

    fn is_root(&self) -> bool {
        let Some(node) = self.dom.get(self.id) else {
            return false;
        };
        self.dom
            .get(node.parent)
            .is_some_and(|parent| matches!(parent.data, NodeData::Document))
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &IdentStr) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn select(dom: &Dom, pattern: &str) -> Vec<NodeId> {
        let group = compile(pattern).expect("pattern should compile");
        select_all(dom, &group)
    }

    #[test]
    fn tag_and_class_selectors() {
        let dom = parse(br#"<h1 class="title">Guide</h1><h1>Plain</h1>"#);

        assert_eq!(select(&dom, "h1").len(), 2);
        assert_eq!(select(&dom, "h1.title").len(), 1);
        assert_eq!(select(&dom, ".missing").len(), 0);
    }

    #[test]
    fn id_selector() {
        let dom = parse(br#"<p id="main">Hello</p>"#);

        assert_eq!(select(&dom, "#main").len(), 1);
        assert_eq!(select(&dom, "p#main").len(), 1);
        assert_eq!(select(&dom, "#other").len(), 0);
    }

    #[test]
    fn descendant_and_child_combinators() {
        let dom = parse(b"<div><span><p>Nested</p></span></div>");

        assert_eq!(select(&dom, "div p").len(), 1);
        assert_eq!(select(&dom, "span > p").len(), 1);
        assert_eq!(select(&dom, "div > p").len(), 0);
    }

    #[test]
    fn attribute_selector() {
        let dom = parse(br#"<a name="intro">x</a><a href="y">y</a>"#);

        assert_eq!(select(&dom, "a[name]").len(), 1);
        assert_eq!(select(&dom, r#"a[name="intro"]"#).len(), 1);
    }

    #[test]
    fn selector_groups_match_in_document_order() {
        let dom = parse(b"<dt>first</dt><dd>second</dd><dt>third</dt>");

        let matched = select(&dom, "dt, dd");
        assert_eq!(matched.len(), 3);
        let texts: Vec<String> = matched.iter().map(|&id| dom.collect_text(id)).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn invalid_pattern_fails_to_compile() {
        assert!(compile("h1..").is_none());
        assert!(compile("][").is_none());
    }
}
