//! Build a [`Document`] from a JSON node-tree description.
//!
//! This is the bulk-construction path complementing the one-node-at-a-time
//! creation helpers. The expected shape per node:
//!
//! ```json
//! {
//!   "nodeType": 1,
//!   "nodeName": "div",
//!   "attributes": { "id": "main", "class": "container" },
//!   "children": [
//!     { "nodeType": 3, "nodeValue": "hello" }
//!   ]
//! }
//! ```
//!
//! Field kinds are checked with the [`value`](crate::value) validator, so a
//! wrong-kind field surfaces the same kind-mismatch errors as any direct
//! call into the helper surface.

use serde_json::Value;

use crate::document::Document;
use crate::error::{DomError, Result};
use crate::strategy::LookupStrategy;
use crate::types::{NodeId, NodeType};
use crate::value::{structural_tag, validate};

/// Load a document from a parsed JSON tree, using the default strategy.
///
/// A top-level document node (type 9) contributes its children directly
/// under the root; any other top-level node is attached under the root
/// itself.
pub fn load_document(tree: &Value) -> Result<Document> {
    let mut doc = Document::new();
    load_into(&mut doc, tree)?;
    Ok(doc)
}

/// Load a document with an explicit lookup strategy.
pub fn load_document_with(tree: &Value, strategy: Box<dyn LookupStrategy>) -> Result<Document> {
    let mut doc = Document::with_strategy(strategy);
    load_into(&mut doc, tree)?;
    Ok(doc)
}

/// Parse `json` and load the resulting tree.
pub fn load_document_str(json: &str) -> Result<Document> {
    let tree: Value = serde_json::from_str(json)?;
    load_document(&tree)
}

fn load_into(doc: &mut Document, tree: &Value) -> Result<()> {
    let root = doc.root_id();
    if node_type_of(tree)? == NodeType::Document {
        for child in children_of(tree)? {
            load_node(doc, child, root)?;
        }
    } else {
        load_node(doc, tree, root)?;
    }
    tracing::debug!(nodes = doc.len(), "loaded document tree");
    Ok(())
}

fn node_type_of(node: &Value) -> Result<NodeType> {
    if !node.is_object() {
        return Err(DomError::Malformed(format!(
            "expected a node object, got {}",
            structural_tag(node)
        )));
    }
    let raw = node
        .get("nodeType")
        .ok_or_else(|| DomError::Malformed("missing nodeType".to_string()))?;
    validate(raw, "number", Some("nodeType must be a number"))?;
    raw.as_u64()
        .and_then(|code| u8::try_from(code).ok())
        .and_then(NodeType::from_u8)
        .ok_or_else(|| DomError::Malformed(format!("unknown nodeType {raw}")))
}

fn children_of(node: &Value) -> Result<&[Value]> {
    match node.get("children") {
        None => Ok(&[]),
        Some(raw) => raw.as_array().map(Vec::as_slice).ok_or_else(|| {
            DomError::Malformed(format!("children must be an array, got {}", structural_tag(raw)))
        }),
    }
}

fn required_str<'a>(node: &'a Value, field: &str, message: &str) -> Result<&'a str> {
    let raw = node
        .get(field)
        .ok_or_else(|| DomError::Malformed(format!("missing {field}")))?;
    validate(raw, "string", Some(message))?;
    // validate guarantees the string kind.
    Ok(raw.as_str().unwrap_or_default())
}

fn load_node(doc: &mut Document, node: &Value, parent: NodeId) -> Result<NodeId> {
    let node_type = node_type_of(node)?;
    match node_type {
        NodeType::Element => {
            let tag = required_str(node, "nodeName", "nodeName must be a string")?;
            let el = doc.create_element(tag, None, None)?;
            doc.append_child(parent, el)?;

            if let Some(attrs) = node.get("attributes") {
                let map = attrs.as_object().ok_or_else(|| {
                    DomError::Malformed(format!(
                        "attributes must be an object, got {}",
                        structural_tag(attrs)
                    ))
                })?;
                for (name, raw) in map {
                    // Structural check, not validate: empty attribute
                    // values ("disabled": "") are legitimate, not absent.
                    let value = raw.as_str().ok_or_else(|| {
                        DomError::Malformed(format!(
                            "attribute {name:?} must be a string, got {}",
                            structural_tag(raw)
                        ))
                    })?;
                    doc.set_attribute(el, name, value)?;
                }
            }

            for child in children_of(node)? {
                load_node(doc, child, el)?;
            }
            Ok(el)
        }
        NodeType::Text => {
            let text = required_str(node, "nodeValue", "nodeValue must be a string")?;
            let id = doc.push_leaf(NodeType::Text, "#text", text);
            doc.append_child(parent, id)?;
            Ok(id)
        }
        NodeType::Comment => {
            let text = match node.get("nodeValue") {
                Some(raw) => {
                    validate(raw, "string", Some("nodeValue must be a string"))?;
                    raw.as_str().unwrap_or_default()
                }
                None => "",
            };
            let id = doc.push_leaf(NodeType::Comment, "#comment", text);
            doc.append_child(parent, id)?;
            Ok(id)
        }
        NodeType::Document => Err(DomError::Malformed(
            "document nodes may only appear at the top level".to_string(),
        )),
        other => Err(DomError::Malformed(format!(
            "unsupported node type {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_simple_tree() {
        let tree = json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "html",
                "children": [
                    {
                        "nodeType": 1,
                        "nodeName": "div",
                        "attributes": { "id": "main", "class": "wrap" },
                        "children": [
                            { "nodeType": 3, "nodeValue": "hello" },
                            { "nodeType": 8, "nodeValue": "note" }
                        ]
                    }
                ]
            }]
        });

        let doc = load_document(&tree).unwrap();
        let main = doc.get_by_id("main").unwrap().expect("id indexed");
        assert_eq!(doc.get(main).unwrap().tag_name(), Some("div"));
        assert_eq!(doc.get_by_class("wrap", None).unwrap(), vec![main]);
        assert_eq!(doc.children(main).unwrap().len(), 2);
    }

    #[test]
    fn test_load_element_at_top_level() {
        let tree = json!({ "nodeType": 1, "nodeName": "div" });
        let doc = load_document(&tree).unwrap();
        assert_eq!(doc.get_by_tag("div", None).unwrap().len(), 1);
    }

    #[test]
    fn test_load_accepts_empty_attribute_values() {
        let tree = json!({
            "nodeType": 1,
            "nodeName": "input",
            "attributes": { "disabled": "", "type": "text" }
        });
        let doc = load_document(&tree).unwrap();
        let input = doc.query("input", None).unwrap().expect("loaded");
        assert_eq!(doc.get(input).unwrap().attr("disabled"), Some(""));
    }

    #[test]
    fn test_load_preserves_whitespace_text() {
        let tree = json!({
            "nodeType": 1,
            "nodeName": "ul",
            "children": [
                { "nodeType": 1, "nodeName": "li" },
                { "nodeType": 3, "nodeValue": "\n  " },
                { "nodeType": 1, "nodeName": "li" }
            ]
        });
        let doc = load_document(&tree).unwrap();
        let items = doc.get_by_tag("li", None).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.next_element(items[0]).unwrap(), Some(items[1]));
    }

    #[test]
    fn test_load_rejects_missing_node_type() {
        let tree = json!({ "nodeName": "div" });
        assert!(matches!(
            load_document(&tree),
            Err(DomError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_rejects_wrong_kind_fields() {
        let tree = json!({ "nodeType": "1", "nodeName": "div" });
        assert!(matches!(
            load_document(&tree),
            Err(DomError::KindMismatch(_))
        ));

        let tree = json!({ "nodeType": 1, "nodeName": 7 });
        assert!(matches!(
            load_document(&tree),
            Err(DomError::KindMismatch(_))
        ));
    }

    #[test]
    fn test_load_rejects_nested_document() {
        let tree = json!({
            "nodeType": 1,
            "nodeName": "div",
            "children": [{ "nodeType": 9, "nodeName": "#document" }]
        });
        assert!(matches!(load_document(&tree), Err(DomError::Malformed(_))));
    }

    #[test]
    fn test_load_from_str() {
        let doc = load_document_str(r#"{ "nodeType": 1, "nodeName": "p" }"#).unwrap();
        assert_eq!(doc.get_by_tag("p", None).unwrap().len(), 1);

        assert!(matches!(
            load_document_str("not json"),
            Err(DomError::Parse(_))
        ));
    }
}
