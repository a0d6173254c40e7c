//! Dynamic value inspection and validation.
//!
//! Two deliberately distinct notions of "type" live here:
//!
//! - [`structural_tag`] reports the underlying data kind, distinguishing
//!   arrays, objects and null ("array", "object", "null", ...).
//! - [`primitive_kind`] reports the coarser `typeof`-style kind, where
//!   arrays, objects and null all report "object".
//!
//! [`validate`] compares against the *primitive* kind only. Callers must
//! pick the right check; the two are not interchangeable.

use serde_json::Value;

use crate::error::{DomError, Result};

/// Lowercase structural tag of a value.
pub fn structural_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coarse primitive kind of a value, `typeof`-style.
pub fn primitive_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

const KNOWN_KINDS: &[&str] = &["boolean", "number", "string", "object"];

/// Truthiness in the dynamic-value sense: null, `false`, zero and the
/// empty string all count as absent.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Assert that `data` has the primitive kind named by `expected_kind`.
///
/// A falsy `data` (null, `false`, zero, the empty string) or an empty
/// `expected_kind` fails with the generic missing-argument error. An
/// `expected_kind` that does not name a known primitive kind fails on its
/// own. A kind mismatch fails with `message` when given, or a generated
/// default otherwise.
pub fn validate(data: &Value, expected_kind: &str, message: Option<&str>) -> Result<()> {
    if is_falsy(data) || expected_kind.is_empty() {
        return Err(DomError::MissingArgument(
            "validate requires both a value and an expected kind",
        ));
    }
    if !KNOWN_KINDS.contains(&expected_kind) {
        return Err(DomError::UnknownKind(expected_kind.to_string()));
    }
    let actual = primitive_kind(data);
    if actual != expected_kind {
        let message = match message {
            Some(m) => m.to_string(),
            None => format!("expected a {expected_kind} value, got {actual} ({data})"),
        };
        return Err(DomError::KindMismatch(message));
    }
    Ok(())
}
