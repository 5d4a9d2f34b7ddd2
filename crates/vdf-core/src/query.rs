//! Dotted-path queries over a [`Node`] tree.
//!
//! # Path syntax
//!
//! - `"appid"` -- the child named `appid`
//! - `"UserConfig.language"` -- `language` inside `UserConfig`
//! - `"*.path"` -- `path` inside every child
//!
//! Segments match names ASCII case-insensitively. A path may start with the
//! name of the node it is applied to, so `"AppState.appid"` and `"appid"` both
//! reach the same leaf of an `AppState` manifest. The leading segment is only
//! taken as the node's own name when the node has no child called that.

use crate::node::Node;

/// A parsed path, split on dots.
#[derive(Debug, Clone)]
struct Path<'a> {
    segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    fn parse(path: &'a str) -> Self {
        Self {
            segments: path.split('.').filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Drop a leading segment that names `node` itself.
    fn relative_to(mut self, node: &Node) -> Self {
        if let Some(&first) = self.segments.first() {
            if first != "*" && node.name().eq_ignore_ascii_case(first) && !node.get(first).is_valid()
            {
                self.segments.remove(0);
            }
        }
        self
    }
}

/// Follow `path` taking the first match at each level.
///
/// Returns the invalid sentinel if any segment is missing. A `*` segment
/// matches the first child. An empty path returns `node` itself.
///
/// ```
/// use vdf_core::{parse, query::find};
/// let doc = parse(r#""AppState" { "UserConfig" { "language" "english" } }"#).unwrap();
/// assert_eq!(find(&doc, "AppState.UserConfig.language").as_str(), Some("english"));
/// assert_eq!(find(&doc, "userconfig.LANGUAGE").as_str(), Some("english"));
/// assert!(!find(&doc, "UserConfig.missing").is_valid());
/// ```
pub fn find<'n>(node: &'n Node, path: &str) -> &'n Node {
    let path = Path::parse(path).relative_to(node);
    let mut current = node;
    for segment in path.segments {
        current = if segment == "*" {
            current.children().first().unwrap_or(Node::invalid())
        } else {
            current.get(segment)
        };
        if !current.is_valid() {
            break;
        }
    }
    current
}

/// Every node reachable through `path`, in document order.
///
/// Unlike [`find`], all siblings sharing a matching name are followed, and
/// `*` fans out over every child.
pub fn find_all<'n>(node: &'n Node, path: &str) -> Vec<&'n Node> {
    let path = Path::parse(path).relative_to(node);
    let mut frontier = vec![node];
    for segment in path.segments {
        frontier = frontier
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|c| segment == "*" || c.name().eq_ignore_ascii_case(segment))
            .collect();
        if frontier.is_empty() {
            break;
        }
    }
    frontier
}
