//! Helpers for the opaque document value exchanged with the engine.

use serde_json::Value;

/// A document as the engine serialises it. The schema is the engine's.
pub type Document = Value;

/// Maps a JSON `null` document to `None` so "no content" has one spelling.
#[must_use]
pub fn normalize_document(document: Option<Value>) -> Option<Value> {
    document.filter(|value| !value.is_null())
}

/// Returns true when a document carries nothing a reader would see.
///
/// Text nodes count when their text is non-empty. Leaf nodes other than
/// `doc`, `paragraph` and `text` (images, rules, embeds) always count.
#[must_use]
pub fn is_empty_document(document: &Value) -> bool {
    !has_visible_content(document)
}

fn has_visible_content(node: &Value) -> bool {
    let Some(object) = node.as_object() else {
        return false;
    };

    if let Some(text) = object.get("text").and_then(Value::as_str) {
        return !text.is_empty();
    }

    match object.get("content").and_then(Value::as_array) {
        Some(children) => children.iter().any(has_visible_content),
        None => {
            let node_type = object.get("type").and_then(Value::as_str).unwrap_or("");
            !matches!(node_type, "" | "doc" | "paragraph" | "text")
        }
    }
}
