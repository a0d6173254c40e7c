//! Small helpers shared across the crate.

use crate::document::Document;
use crate::error::Result;
use crate::types::NodeId;

/// Cap text length, appending an ellipsis when truncated. Cuts on a char
/// boundary so multibyte text never splits mid-character.
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_len).collect();
        format!("{cut}...")
    }
}

/// Concatenated text content of a node and all its descendants, trimmed.
pub fn text_content(doc: &Document, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    doc.traverse_df(node_id, |node| {
        if node.is_text() {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_text_length() {
        assert_eq!(cap_text_length("hello", 10), "hello");
        assert_eq!(cap_text_length("hello world", 5), "hello...");
        assert_eq!(cap_text_length("héllo wörld", 6), "héllo ...");
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::new();
        let div = doc.create_element("div", Some(doc.root_id()), None).unwrap();
        doc.create_text("first ", Some(div)).unwrap();
        let span = doc.create_element("span", Some(div), Some("second")).unwrap();
        doc.create_comment("ignored", Some(div)).unwrap();

        assert_eq!(text_content(&doc, div).unwrap(), "first second");
        assert_eq!(text_content(&doc, span).unwrap(), "second");
    }
}
