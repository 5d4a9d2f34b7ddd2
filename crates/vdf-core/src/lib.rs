//! # vdf-core
//!
//! Pure-Rust reader and writer for **KeyValues** documents (VDF), the
//! hierarchical key-value format Steam uses for library folders, app manifests
//! and its binary caches.
//!
//! Both the text and the binary encoding decode into the same [`Node`] tree.
//! Only the text encoding can be written back.
//!
//! ## Quick start
//!
//! ```rust
//! use vdf_core::{encode, load_text_from_string};
//!
//! let text = "\"AppState\"\n{\n\t\"appid\"\t\t\"440\"\n}\n";
//! let doc = load_text_from_string(text).unwrap();
//! assert_eq!(doc["APPID"].as_i32(0), 440);
//! assert_eq!(encode(&doc), text);
//! ```
//!
//! ## Two tiers of entry points
//!
//! - [`load_text`], [`load_text_from_string`], [`load_binary`] return `None`
//!   on any failure. The cause is logged at `debug` level via `tracing`.
//! - [`read_text`], [`read_binary`] and friends return [`VdfError`] so callers
//!   can tell a missing brace from an unknown binary tag.
//!
//! ## Modules
//!
//! - [`tokenizer`] — text lexer (quotes, escapes, comments, conditionals)
//! - [`decoder`] — text → [`Node`]
//! - [`binary`] — binary → [`Node`]
//! - [`encoder`] — [`Node`] → text
//! - [`node`] — the tree and its typed accessors
//! - [`query`] — dotted-path lookups
//! - [`json`] — JSON export
//! - [`library`] — Steam library and app manifest scanning
//! - [`error`] — error types

pub mod binary;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod library;
pub mod node;
pub mod options;
pub mod query;
pub mod tokenizer;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use binary::{parse_binary, read_binary, read_binary_with};
pub use decoder::{parse, parse_documents, read_text, read_text_with};
pub use encoder::{encode, save_text, write_text, Format};
pub use error::VdfError;
pub use node::Node;
pub use options::ReadOptions;

/// Load a text document from `path`, or `None` if it cannot be read or parsed.
pub fn load_text(path: impl AsRef<Path>) -> Option<Node> {
    load_file(path.as_ref(), |root, file| read_text(root, file))
}

/// Load a text document from memory, or `None` if it cannot be parsed.
pub fn load_text_from_string(text: &str) -> Option<Node> {
    swallow("<string>", parse(text))
}

/// Load a binary document from `path`, or `None` if it cannot be read or decoded.
pub fn load_binary(path: impl AsRef<Path>) -> Option<Node> {
    load_file(path.as_ref(), |root, file| read_binary(root, file))
}

fn load_file(
    path: &Path,
    read: impl FnOnce(&mut Node, BufReader<File>) -> error::Result<()>,
) -> Option<Node> {
    let result = File::open(path).map_err(VdfError::from).and_then(|file| {
        let mut root = Node::default();
        read(&mut root, BufReader::new(file))?;
        Ok(root)
    });
    swallow(&path.display().to_string(), result)
}

fn swallow(source: &str, result: error::Result<Node>) -> Option<Node> {
    result
        .map_err(|e| tracing::debug!(source, error = %e, "failed to load KeyValues document"))
        .ok()
}
