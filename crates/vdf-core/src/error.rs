//! Error types for VDF reading and writing.

use thiserror::Error;

/// Errors that can occur while reading or writing a KeyValues document.
///
/// Text-encoding errors carry the 1-based line number at which the tokenizer
/// was positioned when the problem was detected.
#[derive(Error, Debug)]
pub enum VdfError {
    /// A `/` that does not start a `//` line comment.
    #[error("malformed comment at line {line}: bare '/'")]
    MalformedComment { line: usize },

    /// A top-level name was not followed by `{`.
    #[error("missing opening brace after {name:?} at line {line}")]
    MissingOpeningBrace { name: String, line: usize },

    /// Input ended (or an empty key name appeared) before a block was closed.
    #[error("unexpected end of block at line {line}")]
    UnexpectedEndOfBlock { line: usize },

    /// A key was the last token of the input.
    #[error("missing value for key {key:?} at line {line}")]
    MissingValue { key: String, line: usize },

    /// A key was immediately followed by `}`.
    #[error("unexpected '}}' before value of key {key:?} at line {line}")]
    UnexpectedCloseBeforeValue { key: String, line: usize },

    /// A conditional marker stood where the value of a key was expected.
    #[error("conditional between key {key:?} and its value at line {line}")]
    ConditionalBetweenKeyAndValue { key: String, line: usize },

    /// A binary entry used the wide-string encoding.
    #[error("unsupported encoding (wide string) in entry {name:?}")]
    UnsupportedEncoding { name: String },

    /// A binary entry carried a tag outside the known table.
    #[error("unknown binary type tag {tag} in entry {name:?}")]
    UnknownBinaryTag { tag: u8, name: String },

    /// The binary stream ended inside an entry, or continued past the final End tag.
    #[error("truncated binary stream at offset {offset}: {reason}")]
    TruncatedBinaryStream { offset: u64, reason: &'static str },

    /// Only the text encoding can be written.
    #[error("binary serialization is not implemented")]
    BinarySerializationUnsupported,

    /// Nesting went deeper than `ReadOptions::max_depth`.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout vdf-core.
pub type Result<T> = std::result::Result<T, VdfError>;
