//! DOM convenience library over an arena-backed document tree.
//!
//! Element lookup by id/tag/class/selector, element and text node
//! creation, and sibling/parent traversal, built on a small set of shared
//! primitives:
//!
//! - a dynamic-value [`value`] module (structural tag inspection and
//!   primitive-kind validation, two deliberately distinct checks);
//! - an arena [`Document`] owning every node, with u32 ids instead of
//!   pointers;
//! - a [`LookupStrategy`] chosen once at document construction, covering
//!   the concerns that would otherwise need per-call capability branches
//!   (class matching and element-only sibling navigation).
//!
//! ```
//! use dom_helper::Document;
//!
//! let mut doc = Document::new();
//! let list = doc.create_element("ul", Some(doc.root_id()), None)?;
//! let item = doc.create_element("li", Some(list), Some("first"))?;
//! doc.set_attribute(item, "class", "entry")?;
//!
//! assert_eq!(doc.query_all(".entry", None)?, vec![item]);
//! assert_eq!(doc.next_element(item)?, None);
//! # Ok::<(), dom_helper::DomError>(())
//! ```

pub mod document;
pub mod error;
pub mod loader;
pub mod selector;
pub mod serializer;
pub mod strategy;
pub mod types;
pub mod utils;
pub mod value;

pub use document::{Context, Document};
pub use error::{DomError, Result};
pub use loader::{load_document, load_document_str, load_document_with};
pub use selector::SelectorList;
pub use serializer::{Serializer, SerializerConfig};
pub use strategy::{Legacy, LookupStrategy, Modern};
pub use types::{Node, NodeId, NodeType};
pub use value::{primitive_kind, structural_tag, validate};
