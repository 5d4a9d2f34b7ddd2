//! Lexer for the text encoding.
//!
//! Produces tokens on demand from a borrowed source string:
//!
//! - **Quoted**: `"..."` with `\n`, `\r`, `\t` escapes; any other escaped
//!   character is taken literally. May be empty.
//! - **Structural**: a single `{` or `}`.
//! - **Bare**: everything up to the next quote, brace or whitespace. A bare
//!   token containing `[` followed by `]` is a conditional marker such as
//!   `[$WIN32]`. Markers are reported but never evaluated.
//!
//! Whitespace and `//` line comments between tokens are skipped. End of input
//! is `Ok(None)`, which is distinct from an empty quoted token.

use std::borrow::Cow;

use crate::error::{Result, VdfError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Bare,
    Quoted,
    OpenBrace,
    CloseBrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    /// Set on bare tokens that contain a `[...]` marker.
    pub conditional: bool,
    /// 1-based line on which the token started.
    pub line: usize,
}

impl Token<'_> {
    pub fn was_quoted(&self) -> bool {
        self.kind == TokenKind::Quoted
    }

    pub fn is_open_brace(&self) -> bool {
        self.kind == TokenKind::OpenBrace
    }

    pub fn is_close_brace(&self) -> bool {
        self.kind == TokenKind::CloseBrace
    }
}

pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self { src, pos: 0, line: 1 }
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                break;
            }
        }

        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let line = self.line;

        let token = match c {
            '"' => {
                self.bump();
                Token {
                    kind: TokenKind::Quoted,
                    text: self.read_quoted(),
                    conditional: false,
                    line,
                }
            }
            '{' | '}' => {
                let start = self.pos;
                self.bump();
                Token {
                    kind: if c == '{' {
                        TokenKind::OpenBrace
                    } else {
                        TokenKind::CloseBrace
                    },
                    text: Cow::Borrowed(&self.src[start..self.pos]),
                    conditional: false,
                    line,
                }
            }
            _ => {
                let (text, conditional) = self.read_bare();
                Token {
                    kind: TokenKind::Bare,
                    text: Cow::Borrowed(text),
                    conditional,
                    line,
                }
            }
        };
        Ok(Some(token))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consume one `//` comment through end of line. Returns `false` when the
    /// cursor is not on a comment.
    fn skip_comment(&mut self) -> Result<bool> {
        let rest = &self.src[self.pos..];
        if !rest.starts_with('/') {
            return Ok(false);
        }
        if !rest.starts_with("//") {
            return Err(VdfError::MalformedComment { line: self.line });
        }
        match rest.find('\n') {
            Some(nl) => {
                self.pos += nl + 1;
                self.line += 1;
            }
            None => self.pos = self.src.len(),
        }
        Ok(true)
    }

    /// Body of a quoted token; the opening quote is already consumed.
    /// Borrows from the source when no escape sequence is present.
    fn read_quoted(&mut self) -> Cow<'a, str> {
        let start = self.pos;
        let mut owned: Option<String> = None;

        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    let end = self.pos;
                    self.bump();
                    return match owned {
                        Some(s) => Cow::Owned(s),
                        None => Cow::Borrowed(&self.src[start..end]),
                    };
                }
                '\\' => {
                    let buf = owned.get_or_insert_with(|| self.src[start..self.pos].to_string());
                    self.bump();
                    match self.bump() {
                        Some('n') => buf.push('\n'),
                        Some('r') => buf.push('\r'),
                        Some('t') => buf.push('\t'),
                        Some(other) => buf.push(other),
                        None => {}
                    }
                }
                _ => {
                    self.bump();
                    if let Some(buf) = owned.as_mut() {
                        buf.push(c);
                    }
                }
            }
        }

        // Unterminated: everything up to end of input.
        match owned {
            Some(s) => Cow::Owned(s),
            None => Cow::Borrowed(&self.src[start..]),
        }
    }

    fn read_bare(&mut self) -> (&'a str, bool) {
        let start = self.pos;
        let mut in_brackets = false;
        let mut conditional = false;

        while let Some(c) = self.peek() {
            if matches!(c, '"' | '{' | '}') || c.is_whitespace() {
                break;
            }
            match c {
                '[' => in_brackets = true,
                ']' if in_brackets => conditional = true,
                _ => {}
            }
            self.bump();
        }

        (&self.src[start..self.pos], conditional)
    }
}
