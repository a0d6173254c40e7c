//! Lookup strategies for class matching and element-sibling navigation.
//!
//! The two concerns that historically needed per-call capability checks
//! (class-based lookup and element-only sibling pointers) sit behind one
//! trait with two interchangeable implementations, selected once when the
//! document is constructed:
//!
//! - [`Modern`]: per-node class token matching and element-filtered child
//!   lists.
//! - [`Legacy`]: a full descendant scan testing the raw `class` attribute
//!   with a boundary-anchored regex, and raw sibling walks that skip
//!   non-element nodes.
//!
//! Both return class matches in document order and both sibling walks stop
//! with `None` at the end of the chain.

use std::fmt;

use regex::Regex;

use crate::document::Document;
use crate::error::Result;
use crate::types::NodeId;

pub trait LookupStrategy: fmt::Debug + Send + Sync {
    /// Elements under `ctx` (exclusive) carrying `class` as a whole
    /// whitespace-delimited token, in document order.
    fn elements_by_class(&self, doc: &Document, class: &str, ctx: NodeId) -> Result<Vec<NodeId>>;

    /// Nearest following sibling of `el` that is an element.
    fn next_element(&self, doc: &Document, el: NodeId) -> Option<NodeId>;

    /// Nearest preceding sibling of `el` that is an element.
    fn previous_element(&self, doc: &Document, el: NodeId) -> Option<NodeId>;
}

/// Token-set matching and element-filtered sibling lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modern;

impl LookupStrategy for Modern {
    fn elements_by_class(&self, doc: &Document, class: &str, ctx: NodeId) -> Result<Vec<NodeId>> {
        Ok(doc
            .descendant_elements(ctx)
            .into_iter()
            .filter(|&id| doc.get(id).map(|node| node.has_class(class)).unwrap_or(false))
            .collect())
    }

    fn next_element(&self, doc: &Document, el: NodeId) -> Option<NodeId> {
        doc.following_siblings(el)
            .into_iter()
            .find(|&id| doc.is_element(id))
    }

    fn previous_element(&self, doc: &Document, el: NodeId) -> Option<NodeId> {
        doc.preceding_siblings(el)
            .into_iter()
            .find(|&id| doc.is_element(id))
    }
}

/// Regex scan over raw `class` attributes and one-at-a-time sibling walks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legacy;

impl LookupStrategy for Legacy {
    fn elements_by_class(&self, doc: &Document, class: &str, ctx: NodeId) -> Result<Vec<NodeId>> {
        // Boundary-anchored so "foo" never matches an element classed
        // "foobar".
        let pattern = Regex::new(&format!(r"(\s|^){}(\s|$)", regex::escape(class)))?;
        Ok(doc
            .descendant_elements(ctx)
            .into_iter()
            .filter(|&id| {
                doc.get(id)
                    .map(|node| pattern.is_match(node.attr("class").unwrap_or("")))
                    .unwrap_or(false)
            })
            .collect())
    }

    fn next_element(&self, doc: &Document, el: NodeId) -> Option<NodeId> {
        let mut current = doc.next_sibling(el);
        while let Some(id) = current {
            if doc.is_element(id) {
                return Some(id);
            }
            current = doc.next_sibling(id);
        }
        None
    }

    fn previous_element(&self, doc: &Document, el: NodeId) -> Option<NodeId> {
        let mut current = doc.previous_sibling(el);
        while let Some(id) = current {
            if doc.is_element(id) {
                return Some(id);
            }
            current = doc.previous_sibling(id);
        }
        None
    }
}
