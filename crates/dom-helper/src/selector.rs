//! Minimal selector engine for `query` / `query_all`.
//!
//! Supports the universal selector `*`, tag selectors, `#id`, `.class`,
//! compound simple selectors (`div.item#main`) and comma-separated
//! selector lists. Combinators (descendant, `>`, `+`, `~`) are not
//! supported and fail at parse time.

use crate::error::{DomError, Result};
use crate::types::Node;

/// One simple selector component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
}

impl SimpleSelector {
    fn matches(&self, node: &Node) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => node.node_name.eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => node.attr("id") == Some(id),
            SimpleSelector::Class(class) => node.has_class(class),
        }
    }
}

/// A compound selector: every component must match the same element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn parse(input: &str, whole: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(DomError::selector(whole, "empty compound selector"));
        }
        if input.contains(char::is_whitespace) {
            return Err(DomError::selector(whole, "combinators are not supported"));
        }

        let mut parts = Vec::new();
        let mut rest = input;

        // Optional leading tag or universal selector.
        if !rest.starts_with(['.', '#']) {
            let end = rest.find(['.', '#']).unwrap_or(rest.len());
            let (head, tail) = rest.split_at(end);
            if head == "*" {
                parts.push(SimpleSelector::Universal);
            } else if head.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                parts.push(SimpleSelector::Tag(head.to_ascii_lowercase()));
            } else {
                return Err(DomError::selector(whole, format!("bad tag name {head:?}")));
            }
            rest = tail;
        }

        while !rest.is_empty() {
            let marker = rest
                .chars()
                .next()
                .filter(|&c| matches!(c, '.' | '#'))
                .ok_or_else(|| DomError::selector(whole, format!("unexpected input {rest:?}")))?;
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let (name, tail) = body.split_at(end);
            if name.is_empty() {
                return Err(DomError::selector(whole, format!("empty name after {marker:?}")));
            }
            parts.push(match marker {
                '.' => SimpleSelector::Class(name.to_string()),
                _ => SimpleSelector::Id(name.to_string()),
            });
            rest = tail;
        }

        Ok(Self { parts })
    }

    /// Check whether an element node matches every component.
    pub fn matches(&self, node: &Node) -> bool {
        node.is_element() && self.parts.iter().all(|part| part.matches(node))
    }
}

/// A comma-separated list of compound selectors; an element matches the
/// list if it matches any member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    compounds: Vec<CompoundSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomError::MissingArgument("selector"));
        }
        let compounds = trimmed
            .split(',')
            .map(|part| CompoundSelector::parse(part.trim(), input))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { compounds })
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.compounds.iter().any(|compound| compound.matches(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeType;

    fn element(tag: &str, id: Option<&str>, class: Option<&str>) -> Node {
        let mut node = Node::new(0, NodeType::Element, tag.to_string());
        if let Some(id) = id {
            node.attributes.insert("id".to_string(), id.to_string());
        }
        if let Some(class) = class {
            node.attributes
                .insert("class".to_string(), class.to_string());
        }
        node
    }

    #[test]
    fn test_parse_simple_forms() {
        assert!(SelectorList::parse("div").is_ok());
        assert!(SelectorList::parse(".item").is_ok());
        assert!(SelectorList::parse("#main").is_ok());
        assert!(SelectorList::parse("*").is_ok());
        assert!(SelectorList::parse("ul, ol").is_ok());
        assert!(SelectorList::parse("div.item#main").is_ok());
    }

    #[test]
    fn test_parse_rejects_combinators() {
        assert!(matches!(
            SelectorList::parse("div p"),
            Err(DomError::Selector { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            SelectorList::parse("  "),
            Err(DomError::MissingArgument(_))
        ));
        assert!(matches!(
            SelectorList::parse("div,"),
            Err(DomError::Selector { .. })
        ));
        assert!(matches!(
            SelectorList::parse(".#x"),
            Err(DomError::Selector { .. })
        ));
    }

    #[test]
    fn test_matches_tag_id_class() {
        let node = element("div", Some("main"), Some("container active"));
        assert!(SelectorList::parse("div").unwrap().matches(&node));
        assert!(SelectorList::parse("DIV").unwrap().matches(&node));
        assert!(SelectorList::parse("#main").unwrap().matches(&node));
        assert!(SelectorList::parse(".container").unwrap().matches(&node));
        assert!(SelectorList::parse("*").unwrap().matches(&node));
        assert!(!SelectorList::parse("span").unwrap().matches(&node));
        assert!(!SelectorList::parse(".contain").unwrap().matches(&node));
    }

    #[test]
    fn test_matches_compound_and_list() {
        let node = element("li", Some("first"), Some("item"));
        assert!(SelectorList::parse("li.item#first").unwrap().matches(&node));
        assert!(!SelectorList::parse("li.other#first").unwrap().matches(&node));
        assert!(SelectorList::parse("ol, li").unwrap().matches(&node));
    }

    #[test]
    fn test_non_elements_never_match() {
        let text = Node::new(0, NodeType::Text, "#text".to_string());
        assert!(!SelectorList::parse("*").unwrap().matches(&text));
    }
}
