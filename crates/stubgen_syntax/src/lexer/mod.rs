//! Lexer for C# source text
//!
//! Handles tokenization including:
//! - Reserved keywords (registry-backed) and identifiers, including `@verbatim` identifiers
//! - Numeric, character and string literals (regular, verbatim, interpolated, raw)
//! - Operators and punctuators by longest match against the punctuation registry
//! - Trivia: whitespace, `//` and `/* */` comments, `#` preprocessor lines
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and character literal scanning

mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use stubgen_core::lang::punctuation::{self, MAX_SPELLING_LEN};

/// Lexer for C# source code.
///
/// Lexical errors do not stop scanning; they are collected and returned together once the whole input has been
/// consumed.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Look `n` characters past the next one (`peek_nth(0)` is `peek()`).
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.current_pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(SyntaxError::lexical(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Whitespace (including a leading byte-order mark)
            c if c.is_whitespace() || c == '\u{feff}' => {}

            // Comments
            '/' if self.peek() == Some('/') => self.skip_line(),
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),

            // Preprocessor directives are trivia
            '#' => self.skip_line(),

            // Literals
            '"' => {
                let result = self.quoted_after_quote();
                self.finish_literal(start, result, TokenKind::String);
            }
            '\'' => {
                let result = self.char_body();
                self.finish_literal(start, result, TokenKind::Char);
            }
            '$' => {
                let result = self.interpolated_after_dollar();
                self.finish_literal(start, result, TokenKind::String);
            }
            '@' => self.scan_at(start),
            '0'..='9' => self.scan_number(start, c),
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(start, c),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            // Operators and punctuation
            _ => self.scan_punctuation(start, c),
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.match_char('/') => return,
                Some(_) => {}
                None => {
                    self.error("Unterminated block comment", start);
                    return;
                }
            }
        }
    }

    /// `@"..."`, `@$"..."` or `@identifier`.
    fn scan_at(&mut self, start: usize) {
        match (self.peek(), self.peek_nth(1)) {
            (Some('"'), _) => {
                self.advance();
                let result = self.verbatim_body();
                self.finish_literal(start, result, TokenKind::String);
            }
            (Some('$'), Some('"')) => {
                self.advance();
                self.advance();
                let result = self.interpolated_body(true);
                self.finish_literal(start, result, TokenKind::String);
            }
            (Some(c), _) if is_ident_start(c) => {
                let name_start = self.current_pos;
                self.advance();
                self.consume_ident_rest();
                // Verbatim identifiers are never keywords.
                let name = self.source[name_start..self.current_pos].to_string();
                self.add_token(TokenKind::Ident(name), start);
            }
            _ => self.error("Unexpected character '@'", start),
        }
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    /// Scan a numeric literal, including suffixes (`10UL`, `1.5f`), separators and exponents.
    fn scan_number(&mut self, start: usize, first: char) {
        let is_hex_or_binary = first == '0' && matches!(self.peek(), Some('x' | 'X' | 'b' | 'B'));
        let mut prev = first;
        while let Some(c) = self.peek() {
            let take = c.is_ascii_alphanumeric()
                || c == '_'
                || (c == '.' && self.peek_nth(1).is_some_and(|n| n.is_ascii_digit()))
                || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E') && !is_hex_or_binary);
            if !take {
                break;
            }
            self.advance();
            prev = c;
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(text), start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn consume_ident_rest(&mut self) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        self.consume_ident_rest();

        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    /// Longest match against the punctuation registry.
    fn scan_punctuation(&mut self, start: usize, first: char) {
        let candidate: Vec<char> = std::iter::once(first)
            .chain(self.source[self.current_pos..].chars())
            .take(MAX_SPELLING_LEN)
            .collect();

        for len in (1..=candidate.len()).rev() {
            let spelling: String = candidate[..len].iter().collect();
            if let Some(id) = punctuation::from_str(&spelling) {
                for _ in 1..len {
                    self.advance();
                }
                self.add_token(TokenKind::Punctuation(id), start);
                return;
            }
        }

        self.error(format!("Unexpected character '{first}'"), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
