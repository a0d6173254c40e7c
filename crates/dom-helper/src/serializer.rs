//! Render a subtree back to indented HTML-like text.
//!
//! Intended for debugging and test assertions, not for producing markup a
//! parser must round-trip: text is length-capped and attributes are
//! emitted in sorted order for deterministic output.

use crate::document::Document;
use crate::error::Result;
use crate::types::{NodeId, NodeType};
use crate::utils::cap_text_length;

#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub indent_width: usize,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_text_length: 200,
        }
    }
}

#[derive(Debug, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize the subtree rooted at `start` to text.
    pub fn serialize(&self, doc: &Document, start: NodeId) -> Result<String> {
        let mut output = String::with_capacity(1024);
        self.serialize_node(doc, start, 0, &mut output)?;
        Ok(output)
    }

    fn serialize_node(
        &self,
        doc: &Document,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = doc.get(node_id)?;
        let indent = " ".repeat(depth * self.config.indent_width);

        match node.node_type {
            // The document node contributes no line of its own.
            NodeType::Document => {
                for &child_id in &node.children_ids {
                    self.serialize_node(doc, child_id, depth, output)?;
                }
            }
            NodeType::Element => {
                let mut attrs: Vec<_> = node.attributes.iter().collect();
                attrs.sort_by_key(|(name, _)| name.as_str());
                let attrs: String = attrs
                    .iter()
                    .map(|(name, value)| format!(" {name}={value:?}"))
                    .collect();

                if node.children_ids.is_empty() {
                    output.push_str(&format!("{indent}<{}{attrs}/>\n", node.node_name));
                } else {
                    output.push_str(&format!("{indent}<{}{attrs}>\n", node.node_name));
                    for &child_id in &node.children_ids {
                        self.serialize_node(doc, child_id, depth + 1, output)?;
                    }
                    output.push_str(&format!("{indent}</{}>\n", node.node_name));
                }
            }
            NodeType::Text => {
                let text = node.node_value.trim();
                if !text.is_empty() {
                    let capped = cap_text_length(text, self.config.max_text_length);
                    output.push_str(&format!("{indent}{capped}\n"));
                }
            }
            NodeType::Comment => {
                output.push_str(&format!("{indent}<!-- {} -->\n", node.node_value.trim()));
            }
            _ => {}
        }

        Ok(())
    }
}
