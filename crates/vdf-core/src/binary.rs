//! Binary decoder: builds a [`Node`] tree from the type-tagged binary encoding.
//!
//! Each entry is a tag byte, a NUL-terminated UTF-8 name and a tag-specific
//! payload. A `None` entry opens a nested block which runs until its own `End`
//! tag. Numeric payloads are little-endian and are stored in the tree as their
//! decimal text form, so a decoded tree looks exactly like one parsed from
//! text.
//!
//! Top-level entries become children of the root; the root's own name is left
//! alone. Once the top-level `End` tag is read the input must be exhausted.

use std::io::Read;

use crate::error::{Result, VdfError};
use crate::node::Node;
use crate::options::ReadOptions;

/// One-byte entry discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    None = 0,
    String = 1,
    Int32 = 2,
    Float32 = 3,
    Pointer = 4,
    WideString = 5,
    Color = 6,
    UInt64 = 7,
    End = 8,
}

impl Tag {
    pub fn from_byte(b: u8) -> Option<Tag> {
        Some(match b {
            0 => Tag::None,
            1 => Tag::String,
            2 => Tag::Int32,
            3 => Tag::Float32,
            4 => Tag::Pointer,
            5 => Tag::WideString,
            6 => Tag::Color,
            7 => Tag::UInt64,
            8 => Tag::End,
            _ => return None,
        })
    }
}

/// Decode a complete binary document.
pub fn parse_binary(data: &[u8]) -> Result<Node> {
    let mut root = Node::default();
    decode_into(&mut root, data, &ReadOptions::default())?;
    Ok(root)
}

/// Read a binary document from `input` into `root`, replacing its children.
pub fn read_binary<R: Read>(root: &mut Node, input: R) -> Result<()> {
    read_binary_with(root, input, &ReadOptions::default())
}

/// [`read_binary`] with explicit options.
pub fn read_binary_with<R: Read>(root: &mut Node, mut input: R, opts: &ReadOptions) -> Result<()> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    decode_into(root, &data, opts)
}

/// Decode `data` into `root`, replacing its children.
pub fn decode_into(root: &mut Node, data: &[u8], opts: &ReadOptions) -> Result<()> {
    root.clear();
    let mut cursor = Cursor { data, pos: 0 };
    // Nested blocks still open below `root`, innermost last.
    let mut open: Vec<Node> = Vec::new();

    loop {
        let byte = cursor.read_u8("missing End tag")?;

        if byte == Tag::End as u8 {
            match open.pop() {
                Some(done) => {
                    open.last_mut().unwrap_or(&mut *root).push(done);
                    continue;
                }
                None => break,
            }
        }

        let name = cursor.read_cstr()?;
        let value = match Tag::from_byte(byte) {
            Some(Tag::None) => {
                if open.len() + 2 > opts.max_depth {
                    return Err(VdfError::DepthLimitExceeded {
                        limit: opts.max_depth,
                    });
                }
                open.push(Node::new(name));
                continue;
            }
            Some(Tag::String) => cursor.read_cstr()?,
            Some(Tag::Int32 | Tag::Pointer | Tag::Color) => {
                i32::from_le_bytes(cursor.read_array()?).to_string()
            }
            Some(Tag::UInt64) => u64::from_le_bytes(cursor.read_array()?).to_string(),
            Some(Tag::Float32) => f32::from_le_bytes(cursor.read_array()?).to_string(),
            Some(Tag::WideString) => return Err(VdfError::UnsupportedEncoding { name }),
            Some(Tag::End) | None => return Err(VdfError::UnknownBinaryTag { tag: byte, name }),
        };

        open.last_mut()
            .unwrap_or(&mut *root)
            .push(Node::leaf(name, value));
    }

    if cursor.pos != data.len() {
        return Err(VdfError::TruncatedBinaryStream {
            offset: cursor.pos as u64,
            reason: "trailing bytes after End tag",
        });
    }
    Ok(())
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn truncated(&self, reason: &'static str) -> VdfError {
        VdfError::TruncatedBinaryStream {
            offset: self.pos as u64,
            reason,
        }
    }

    fn read_u8(&mut self, reason: &'static str) -> Result<u8> {
        let b = *self.data.get(self.pos).ok_or_else(|| self.truncated(reason))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let data = self.data;
        let bytes = data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| self.truncated("numeric payload cut short"))?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// NUL-terminated string. Invalid UTF-8 is replaced, not rejected.
    fn read_cstr(&mut self) -> Result<String> {
        let rest = &self.data[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| self.truncated("unterminated string"))?;
        let s = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.pos += len + 1;
        Ok(s)
    }
}
