//! Text encoder: serializes a [`Node`] tree back to the text encoding.
//!
//! Output is deterministic: one tab per nesting level, every name and value
//! quoted, two tabs between a key and its value.
//!
//! ```
//! use vdf_core::{encode, Node};
//! let node = Node::new("AppState").with_child(Node::leaf("appid", "440"));
//! assert_eq!(encode(&node), "\"AppState\"\n{\n\t\"appid\"\t\t\"440\"\n}\n");
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, VdfError};
use crate::node::Node;

/// Output encoding for [`save_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    /// Not supported for writing.
    Binary,
}

/// Encode `node` as a named block.
pub fn encode(node: &Node) -> String {
    let mut out = String::new();
    encode_block(node, 0, &mut out);
    out
}

/// Write `node` in the text encoding to `out`.
pub fn write_text<W: Write>(node: &Node, mut out: W) -> Result<()> {
    out.write_all(encode(node).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Save `node` to `path`, creating or truncating the file.
///
/// [`Format::Binary`] fails with [`VdfError::BinarySerializationUnsupported`]
/// before the file is touched.
pub fn save_text(node: &Node, path: impl AsRef<Path>, format: Format) -> Result<()> {
    if format == Format::Binary {
        return Err(VdfError::BinarySerializationUnsupported);
    }
    let file = File::create(path)?;
    write_text(node, BufWriter::new(file))
}

fn encode_block(node: &Node, depth: usize, out: &mut String) {
    push_indent(depth, out);
    push_quoted(node.name(), out);
    out.push('\n');
    push_indent(depth, out);
    out.push_str("{\n");

    for child in node.children() {
        match child.value() {
            None => encode_block(child, depth + 1, out),
            Some(value) => {
                push_indent(depth + 1, out);
                push_quoted(child.name(), out);
                out.push_str("\t\t");
                push_quoted(value, out);
                out.push('\n');
            }
        }
    }

    push_indent(depth, out);
    out.push_str("}\n");
}

fn push_indent(depth: usize, out: &mut String) {
    out.extend(std::iter::repeat_n('\t', depth));
}

/// Quote `s`, escaping `\` as `\\` and `"` as `\"`. Control characters are
/// written as-is.
fn push_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
}
