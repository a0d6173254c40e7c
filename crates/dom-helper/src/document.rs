//! Arena-based document tree and the helper surface over it.
//!
//! All nodes live in a single `Vec`; `NodeId` is the index. Parent and
//! child links are ids, never pointers. An id-attribute index accelerates
//! `get_by_id` and is kept consistent by every attribute mutation.

use ahash::AHashMap;

use crate::error::{DomError, Result};
use crate::selector::SelectorList;
use crate::strategy::{LookupStrategy, Modern};
use crate::types::{Node, NodeId, NodeType};

/// Scope argument for selector lookups: either a node, or a selector
/// string resolved to its first match.
#[derive(Debug, Clone, Copy)]
pub enum Context<'a> {
    Node(NodeId),
    Selector(&'a str),
}

impl From<NodeId> for Context<'_> {
    fn from(id: NodeId) -> Self {
        Context::Node(id)
    }
}

impl<'a> From<&'a str> for Context<'a> {
    fn from(selector: &'a str) -> Self {
        Context::Selector(selector)
    }
}

/// The document tree.
///
/// Index 0 is always the `#document` root node. The lookup strategy is
/// selected once at construction and never re-chosen per call.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    /// id attribute -> element (first registered wins, like getElementById).
    id_index: AHashMap<String, NodeId>,
    root_id: NodeId,
    strategy: Box<dyn LookupStrategy>,
}

impl Document {
    /// Create an empty document using the [`Modern`] lookup strategy.
    pub fn new() -> Self {
        Self::with_strategy(Box::new(Modern))
    }

    /// Create an empty document with an explicit lookup strategy.
    pub fn with_strategy(strategy: Box<dyn LookupStrategy>) -> Self {
        let root = Node::new(0, NodeType::Document, "#document".to_string());
        Self {
            nodes: vec![root],
            id_index: AHashMap::new(),
            root_id: 0,
            strategy,
        }
    }

    /// Root (`#document`) node id.
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_id as usize]
    }

    /// Total number of nodes, the root included. Never zero.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get node by id.
    pub fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Check whether `node_id` names an element node.
    pub fn is_element(&self, node_id: NodeId) -> bool {
        self.get(node_id).map(|node| node.is_element()).unwrap_or(false)
    }

    fn require_element(&self, node_id: NodeId) -> Result<&Node> {
        let node = self.get(node_id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(node_id));
        }
        Ok(node)
    }

    /// A node able to host children: an element, or the document node
    /// itself (nothing else could hold top-level elements).
    fn require_container(&self, node_id: NodeId) -> Result<&Node> {
        let node = self.get(node_id)?;
        match node.node_type {
            NodeType::Element | NodeType::Document => Ok(node),
            _ => Err(DomError::NotAnElement(node_id)),
        }
    }

    /// Get children of a node.
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&Node>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node.
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&Node>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Traverse the subtree under `start_id` depth-first, preorder
    /// (iterative, no recursion).
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&Node) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited
            // left-to-right).
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Element descendants of `ctx` (exclusive), in document order.
    pub fn descendant_elements(&self, ctx: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(ctx) {
            Ok(node) => node.children_ids.iter().rev().copied().collect(),
            Err(_) => return out,
        };

        while let Some(node_id) = stack.pop() {
            if let Ok(node) = self.get(node_id) {
                if node.is_element() {
                    out.push(node_id);
                }
                for &child_id in node.children_ids.iter().rev() {
                    stack.push(child_id);
                }
            }
        }

        out
    }

    /// Immediate following sibling, element or not.
    pub fn next_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        self.sibling_at(node_id, 1)
    }

    /// Immediate preceding sibling, element or not.
    pub fn previous_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        self.sibling_at(node_id, -1)
    }

    fn sibling_at(&self, node_id: NodeId, offset: isize) -> Option<NodeId> {
        let parent_id = self.get(node_id).ok()?.parent_id?;
        let siblings = &self.get(parent_id).ok()?.children_ids;
        let pos = siblings.iter().position(|&id| id == node_id)?;
        let target = pos.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }

    /// All siblings after `node_id`, nearest first.
    pub fn following_siblings(&self, node_id: NodeId) -> Vec<NodeId> {
        let Some(parent_id) = self.get(node_id).ok().and_then(|n| n.parent_id) else {
            return Vec::new();
        };
        let Ok(parent) = self.get(parent_id) else {
            return Vec::new();
        };
        match parent.children_ids.iter().position(|&id| id == node_id) {
            Some(pos) => parent.children_ids[pos + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    /// All siblings before `node_id`, nearest first.
    pub fn preceding_siblings(&self, node_id: NodeId) -> Vec<NodeId> {
        let Some(parent_id) = self.get(node_id).ok().and_then(|n| n.parent_id) else {
            return Vec::new();
        };
        let Ok(parent) = self.get(parent_id) else {
            return Vec::new();
        };
        match parent.children_ids.iter().position(|&id| id == node_id) {
            Some(pos) => parent.children_ids[..pos].iter().rev().copied().collect(),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    fn push_node(&mut self, node_type: NodeType, node_name: String) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(node_id, node_type, node_name));
        node_id
    }

    /// Insert a valueless leaf node without attaching it. Unlike
    /// [`create_text`](Self::create_text) this accepts empty and
    /// whitespace-only values, which loaded documents legitimately contain.
    pub(crate) fn push_leaf(&mut self, node_type: NodeType, name: &str, value: &str) -> NodeId {
        let node_id = self.push_node(node_type, name.to_string());
        self.nodes[node_id as usize].node_value = value.to_string();
        node_id
    }

    /// Create an element, optionally attaching it to `parent` and giving
    /// it a text child.
    ///
    /// The parent must be an element node (or the document root). The new
    /// element's id is returned whether or not it was attached. Effects
    /// are not rolled back on a later failure: an element appended before
    /// the text argument fails validation stays attached.
    pub fn create_element(
        &mut self,
        tag: &str,
        parent: Option<NodeId>,
        text: Option<&str>,
    ) -> Result<NodeId> {
        let tag = require_nonempty(tag, "tag name")?;
        let el = self.push_node(NodeType::Element, tag.to_string());
        tracing::trace!(tag, node_id = el, "created element");

        if let Some(parent_id) = parent {
            self.append_child(parent_id, el)?;
        }
        if let Some(text) = text {
            self.create_text(text, Some(el))?;
        }

        Ok(el)
    }

    /// Create a text node, optionally appending it to element `el`.
    ///
    /// The text node's id is returned in both cases. Only the empty
    /// string is rejected: whitespace-only text is a real node (the kind
    /// sibling walks exist to skip).
    pub fn create_text(&mut self, text: &str, el: Option<NodeId>) -> Result<NodeId> {
        if text.is_empty() {
            return Err(DomError::MissingArgument("text"));
        }
        let text_id = self.push_leaf(NodeType::Text, "#text", text);

        if let Some(el_id) = el {
            self.require_element(el_id)?;
            self.append_child(el_id, text_id)?;
        }

        Ok(text_id)
    }

    /// Create a comment node under `parent` (root when absent).
    pub fn create_comment(&mut self, text: &str, parent: Option<NodeId>) -> Result<NodeId> {
        let comment_id = self.push_leaf(NodeType::Comment, "#comment", text);
        if let Some(parent_id) = parent {
            self.append_child(parent_id, comment_id)?;
        }
        Ok(comment_id)
    }

    /// Append `child` as the last child of `parent`, detaching it from
    /// any previous parent first. The parent must be able to host
    /// children (an element or the document node).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.require_container(parent)?;
        let old_parent = self.get(child)?.parent_id;

        if let Some(old_id) = old_parent {
            let old = self.get_mut(old_id)?;
            // SmallVec::retain hands the predicate a mutable reference.
            old.children_ids.retain(|id| *id != child);
        }

        self.get_mut(child)?.parent_id = Some(parent);
        self.get_mut(parent)?.children_ids.push(child);
        Ok(())
    }

    /// Set an attribute on an element, keeping the id index consistent.
    pub fn set_attribute(&mut self, el: NodeId, name: &str, value: &str) -> Result<()> {
        self.require_element(el)?;

        if name == "id" {
            let previous = self.get(el)?.attr("id").map(str::to_owned);
            if let Some(previous) = previous {
                if self.id_index.get(&previous) == Some(&el) {
                    self.id_index.remove(&previous);
                }
            }
            // First-registered element wins on duplicate ids.
            self.id_index.entry(value.to_string()).or_insert(el);
        }

        self.get_mut(el)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Find the element carrying `id` as its id attribute.
    pub fn get_by_id(&self, id: &str) -> Result<Option<NodeId>> {
        let id = require_nonempty(id, "id")?;
        Ok(self.id_index.get(id).copied())
    }

    /// Elements with tag name `tag` under `ctx` (root when absent), in
    /// document order. Matching is ASCII case-insensitive; `"*"` matches
    /// every element.
    pub fn get_by_tag(&self, tag: &str, ctx: Option<NodeId>) -> Result<Vec<NodeId>> {
        let tag = require_nonempty(tag, "tag name")?;
        let ctx = self.resolve_node_context(ctx)?;
        if tag == "*" {
            return Ok(self.descendant_elements(ctx));
        }
        Ok(self
            .descendant_elements(ctx)
            .into_iter()
            .filter(|&id| {
                self.get(id)
                    .map(|node| node.node_name.eq_ignore_ascii_case(tag))
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Elements carrying `class` as a whole whitespace-delimited token
    /// under `ctx` (root when absent), via the selected strategy.
    pub fn get_by_class(&self, class: &str, ctx: Option<NodeId>) -> Result<Vec<NodeId>> {
        let class = require_nonempty(class, "class name")?;
        let ctx = self.resolve_node_context(ctx)?;
        self.strategy.elements_by_class(self, class, ctx)
    }

    /// All elements under the context matching `selector`, in document
    /// order.
    pub fn query_all(&self, selector: &str, ctx: Option<Context<'_>>) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let ctx = self.resolve_context(ctx)?;
        Ok(self
            .descendant_elements(ctx)
            .into_iter()
            .filter(|&id| self.get(id).map(|node| list.matches(node)).unwrap_or(false))
            .collect())
    }

    /// First element under the context matching `selector`.
    pub fn query(&self, selector: &str, ctx: Option<Context<'_>>) -> Result<Option<NodeId>> {
        Ok(self.query_all(selector, ctx)?.into_iter().next())
    }

    fn resolve_node_context(&self, ctx: Option<NodeId>) -> Result<NodeId> {
        match ctx {
            Some(id) => {
                self.get(id)?;
                Ok(id)
            }
            None => Ok(self.root_id),
        }
    }

    fn resolve_context(&self, ctx: Option<Context<'_>>) -> Result<NodeId> {
        match ctx {
            Some(Context::Node(id)) => {
                self.get(id)?;
                Ok(id)
            }
            // A context selector that matches nothing falls back to the
            // whole document.
            Some(Context::Selector(sel)) => {
                Ok(self.query(sel, None)?.unwrap_or(self.root_id))
            }
            None => Ok(self.root_id),
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Ascend from element `el` through up to `depth` parents (default 1),
    /// stopping early once an ascended node is absent or not an element.
    ///
    /// The node reached is returned as-is; it may be a non-element (the
    /// document node, say) or `None` when the chain runs out.
    pub fn parent_at(&self, el: NodeId, depth: Option<u32>) -> Result<Option<NodeId>> {
        self.require_element(el)?;
        let depth = depth.unwrap_or(1);
        if depth == 0 {
            return Err(DomError::InvalidDepth(depth));
        }

        let mut current = self.get(el)?.parent_id;
        let mut remaining = depth;
        loop {
            remaining -= 1;
            match current {
                Some(id) if remaining > 0 && self.is_element(id) => {
                    current = self.get(id)?.parent_id;
                }
                _ => break,
            }
        }
        Ok(current)
    }

    /// Nearest following element sibling of element `el`.
    pub fn next_element(&self, el: NodeId) -> Result<Option<NodeId>> {
        self.require_element(el)?;
        Ok(self.strategy.next_element(self, el))
    }

    /// Nearest preceding element sibling of element `el`.
    pub fn previous_element(&self, el: NodeId) -> Result<Option<NodeId>> {
        self.require_element(el)?;
        Ok(self.strategy.previous_element(self, el))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn require_nonempty<'a>(value: &'a str, what: &'static str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(DomError::MissingArgument(what));
    }
    Ok(value)
}
