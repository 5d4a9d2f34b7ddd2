//! The KeyValues tree.
//!
//! Every element of a document is a [`Node`]: a name plus either a text value
//! (a leaf) or an ordered list of children (a block). Values are always stored
//! as text, even when the binary encoding carried an integer or a float; the
//! typed accessors parse on demand and fall back to a caller-supplied default.

use std::fmt;
use std::ops::Index;

/// Returned by lookups that find nothing. Has no name, no value and no children.
static INVALID: Node = Node::empty();

/// A named element of a KeyValues document.
///
/// A node never holds a value and children at the same time: setting a value
/// drops the children and attaching a child drops the value. A node with
/// neither is an empty block (`"Foo" { }`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    value: Option<String>,
    children: Vec<Node>,
}

impl Node {
    const fn empty() -> Self {
        Self {
            name: String::new(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Create an empty block with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node holding `value`.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// The shared sentinel returned by lookup misses.
    pub fn invalid() -> &'static Node {
        &INVALID
    }

    /// `false` only for the lookup-miss sentinel (and nodes indistinguishable from it).
    pub fn is_valid(&self) -> bool {
        *self != INVALID
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The leaf value, or `None` for blocks.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Turn this node into a leaf. Any children are dropped.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.value = Some(value.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Append a child, turning this node into a block if it was a leaf.
    pub fn push(&mut self, child: Node) {
        self.value = None;
        self.children.push(child);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_child(mut self, child: Node) -> Self {
        self.push(child);
        self
    }

    /// Remove every child, leaving an empty block.
    pub fn clear(&mut self) {
        self.value = None;
        self.children.clear();
    }

    pub fn is_leaf(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_block(&self) -> bool {
        self.value.is_none()
    }

    /// First child whose name matches `key` (ASCII case-insensitive), or the
    /// invalid sentinel when there is none.
    pub fn get(&self, key: &str) -> &Node {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(key))
            .unwrap_or(&INVALID)
    }

    /// Mutable counterpart of [`get`](Self::get). Misses return `None` since the
    /// sentinel is shared.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value()
    }

    pub fn as_i32(&self, default: i32) -> i32 {
        self.parse_value().unwrap_or(default)
    }

    pub fn as_i64(&self, default: i64) -> i64 {
        self.parse_value().unwrap_or(default)
    }

    pub fn as_f32(&self, default: f32) -> f32 {
        self.parse_value().unwrap_or(default)
    }

    /// Parses the value as an `i32` and reports whether it is non-zero.
    pub fn as_bool(&self, default: bool) -> bool {
        self.parse_value::<i32>().map_or(default, |v| v != 0)
    }

    fn parse_value<T: std::str::FromStr>(&self) -> Option<T> {
        self.value.as_deref()?.trim().parse().ok()
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get(key)
    }
}

/// `name = value`, for diagnostics. Not a serialization format.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value.as_deref().unwrap_or(""))
    }
}
