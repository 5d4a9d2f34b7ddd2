//! JSON export of a [`Node`] tree.
//!
//! Leaves become JSON strings (values are text in both encodings) and blocks
//! become objects in document order. KeyValues allows repeated sibling names
//! where JSON objects do not, so repeats are collected into an array under the
//! first occurrence's key.

use serde_json::{Map, Value};

use crate::node::Node;

/// Convert `node`'s contents to JSON. The node's own name is not included;
/// wrap the result yourself if you need it.
///
/// ```
/// use serde_json::json;
/// use vdf_core::{json::to_json, Node};
///
/// let node = Node::new("root")
///     .with_child(Node::leaf("a", "1"))
///     .with_child(Node::leaf("A", "2"));
/// assert_eq!(to_json(&node), json!({"a": ["1", "2"]}));
/// ```
pub fn to_json(node: &Node) -> Value {
    if let Some(value) = node.value() {
        return Value::String(value.to_string());
    }

    let mut map = Map::new();
    // Lowercased name -> key actually used in `map`.
    let mut seen: Vec<(String, String)> = Vec::new();

    for child in node.children() {
        let converted = to_json(child);
        let folded = child.name().to_ascii_lowercase();
        match seen.iter().find(|(f, _)| *f == folded) {
            Some((_, key)) => match map.get_mut(key) {
                Some(Value::Array(items)) => items.push(converted),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, converted]);
                }
                None => {}
            },
            None => {
                seen.push((folded, child.name().to_string()));
                map.insert(child.name().to_string(), converted);
            }
        }
    }

    Value::Object(map)
}

/// Like [`to_json`], but keyed by the node's own name: `{"name": {...}}`.
pub fn to_json_named(node: &Node) -> Value {
    let mut map = Map::new();
    map.insert(node.name().to_string(), to_json(node));
    Value::Object(map)
}
