//! Core node types.
//!
//! Design:
//! 1. u32 indices instead of pointers
//! 2. SmallVec for child lists (most nodes have <4 children)
//! 3. Plain owned strings for names/values

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into the document arena).
pub type NodeId = u32;

/// Node type matching the DOM specification's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// A single node in the document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub node_id: NodeId,
    pub node_type: NodeType,

    /// Tag name for elements, "#text"/"#comment"/"#document" otherwise.
    pub node_name: String,
    /// Content for text and comment nodes, empty otherwise.
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub(crate) fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            node_name,
            node_value: String::new(),
            attributes: HashMap::new(),
            parent_id: None,
            children_ids: SmallVec::new(),
        }
    }

    /// Check if node is an element (DOM node type code 1).
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text.
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get tag name for element nodes.
    pub fn tag_name(&self) -> Option<&str> {
        if self.is_element() {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Get attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Whitespace-delimited tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check whether `name` appears as a whole class token.
    ///
    /// Token match only: "foo" does not match an element classed "foobar".
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|token| token == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_codes() {
        assert_eq!(NodeType::from_u8(1), Some(NodeType::Element));
        assert_eq!(NodeType::from_u8(3), Some(NodeType::Text));
        assert_eq!(NodeType::from_u8(9), Some(NodeType::Document));
        assert_eq!(NodeType::from_u8(0), None);
        assert_eq!(NodeType::from_u8(13), None);
    }

    #[test]
    fn test_element_predicate() {
        let el = Node::new(0, NodeType::Element, "div".to_string());
        let text = Node::new(1, NodeType::Text, "#text".to_string());
        assert!(el.is_element());
        assert!(!text.is_element());
        assert!(text.is_text());
        assert_eq!(el.tag_name(), Some("div"));
        assert_eq!(text.tag_name(), None);
    }

    #[test]
    fn test_class_tokens() {
        let mut el = Node::new(0, NodeType::Element, "div".to_string());
        el.attributes
            .insert("class".to_string(), "foo  bar\tbaz".to_string());
        assert!(el.has_class("foo"));
        assert!(el.has_class("baz"));
        assert!(!el.has_class("fo"));
        assert!(!el.has_class("foobar"));
        assert_eq!(el.classes().count(), 3);
    }
}
