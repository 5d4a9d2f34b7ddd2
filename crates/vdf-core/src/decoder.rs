//! Text decoder: builds a [`Node`] tree from the text encoding.
//!
//! A document is one or more records of the form
//!
//! ```text
//! "Name"
//! {
//!     "key"       "value"
//!     "block"
//!     {
//!         ...
//!     }
//! }
//! ```
//!
//! # Key design decisions
//!
//! - **Explicit stack**: open blocks live on a heap-allocated stack instead of
//!   the call stack, so nesting depth is limited by [`ReadOptions::max_depth`]
//!   and never by thread stack size.
//! - **Conditionals are not evaluated**: a `[$PLATFORM]` marker where a value
//!   or opening brace is expected is skipped and the following token is used.
//!   Content is accepted on every platform.
//! - **First record wins**: [`read_text`] fills the root from the first record.
//!   Later records are still parsed, so malformed trailing input is reported,
//!   but are then dropped. Use [`parse_documents`] to keep all of them.

use std::io::Read;

use crate::error::{Result, VdfError};
use crate::node::Node;
use crate::options::ReadOptions;
use crate::tokenizer::{Token, Tokenizer};

/// Parse a text document and return its first record.
///
/// An empty document yields an empty, unnamed node.
pub fn parse(text: &str) -> Result<Node> {
    let mut root = Node::default();
    parse_into(&mut root, text, &ReadOptions::default())?;
    Ok(root)
}

/// Parse every top-level record in `text`.
pub fn parse_documents(text: &str) -> Result<Vec<Node>> {
    let opts = ReadOptions::default();
    let mut tokens = Tokenizer::new(text);
    let mut records = Vec::new();
    while let Some(record) = read_record(&mut tokens, &opts)? {
        records.push(record);
    }
    Ok(records)
}

/// Read a text document from `input` into `root`, replacing its contents.
pub fn read_text<R: Read>(root: &mut Node, input: R) -> Result<()> {
    read_text_with(root, input, &ReadOptions::default())
}

/// [`read_text`] with explicit options.
pub fn read_text_with<R: Read>(root: &mut Node, mut input: R, opts: &ReadOptions) -> Result<()> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    parse_into(root, &text, opts)
}

/// Parse `text` into `root`, replacing its contents.
pub fn parse_into(root: &mut Node, text: &str, opts: &ReadOptions) -> Result<()> {
    root.clear();
    let mut tokens = Tokenizer::new(text);

    let Some(first) = read_record(&mut tokens, opts)? else {
        return Ok(());
    };
    *root = first;

    while let Some(extra) = read_record(&mut tokens, opts)? {
        tracing::debug!(name = extra.name(), "dropping additional top-level record");
    }
    Ok(())
}

/// Read one `"Name" { ... }` record. Returns `None` when the input is
/// exhausted or the next name is empty.
fn read_record(tokens: &mut Tokenizer<'_>, opts: &ReadOptions) -> Result<Option<Node>> {
    let name = match tokens.next_token()? {
        Some(t) if !t.text.is_empty() => t,
        _ => return Ok(None),
    };

    let open = next_skipping_conditional(tokens)?;
    if !open.as_ref().is_some_and(Token::is_open_brace) {
        return Err(VdfError::MissingOpeningBrace {
            name: name.text.into_owned(),
            line: tokens.line(),
        });
    }

    let mut node = Node::new(name.text);
    load_block(&mut node, tokens, opts)?;
    Ok(Some(node))
}

/// Read a token; if it is a conditional marker, discard it and read the next.
fn next_skipping_conditional<'a>(tokens: &mut Tokenizer<'a>) -> Result<Option<Token<'a>>> {
    match tokens.next_token()? {
        Some(t) if t.conditional => tokens.next_token(),
        other => Ok(other),
    }
}

/// Fill `root` with the contents of a block whose `{` was just consumed,
/// stopping after the matching `}`.
fn load_block(root: &mut Node, tokens: &mut Tokenizer<'_>, opts: &ReadOptions) -> Result<()> {
    // Nested blocks still open below `root`, innermost last. Each is attached
    // to its parent when its `}` arrives.
    let mut open: Vec<Node> = Vec::new();

    loop {
        let name = match tokens.next_token()? {
            Some(t) if !t.text.is_empty() => t,
            _ => {
                return Err(VdfError::UnexpectedEndOfBlock {
                    line: tokens.line(),
                })
            }
        };

        if name.is_close_brace() {
            match open.pop() {
                Some(done) => {
                    open.last_mut().unwrap_or(&mut *root).push(done);
                    continue;
                }
                None => return Ok(()),
            }
        }

        let key = name.text;
        let Some(value) = next_skipping_conditional(tokens)? else {
            return Err(VdfError::MissingValue {
                key: key.into_owned(),
                line: tokens.line(),
            });
        };

        if value.is_close_brace() {
            return Err(VdfError::UnexpectedCloseBeforeValue {
                key: key.into_owned(),
                line: value.line,
            });
        }

        if value.is_open_brace() {
            // root + open blocks + the one being opened
            if open.len() + 2 > opts.max_depth {
                return Err(VdfError::DepthLimitExceeded {
                    limit: opts.max_depth,
                });
            }
            open.push(Node::new(key));
            continue;
        }

        if value.conditional {
            return Err(VdfError::ConditionalBetweenKeyAndValue {
                key: key.into_owned(),
                line: value.line,
            });
        }

        open.last_mut()
            .unwrap_or(&mut *root)
            .push(Node::leaf(key, value.text));
    }
}
