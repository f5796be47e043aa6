//! String and character literal scanning.
//!
//! Every body scanner starts just after the opening delimiter and stops just after the closing one. Literal
//! contents are never decoded; the scanners only need to find where a literal ends so that braces and quotes
//! inside it never reach the parser.

use super::{Lexer, TokenKind};

type ScanResult = Result<(), &'static str>;

impl<'a> Lexer<'a> {
    /// Emit the literal token spanning `start..current_pos`, or record the scan error.
    pub(super) fn finish_literal(&mut self, start: usize, result: ScanResult, make: fn(String) -> TokenKind) {
        match result {
            Ok(()) => {
                let text = self.source[start..self.current_pos].to_string();
                self.add_token(make(text), start);
            }
            Err(message) => self.error(message, start),
        }
    }

    /// After a `"`: either a raw string (`"""`) or a regular one.
    pub(super) fn quoted_after_quote(&mut self) -> ScanResult {
        if self.peek() == Some('"') && self.peek_nth(1) == Some('"') {
            let quotes = 1 + self.consume_quote_run();
            self.raw_body(quotes)
        } else {
            self.string_body()
        }
    }

    /// After the first `$`: further `$`s, an optional `@`, then the opening quote(s).
    pub(super) fn interpolated_after_dollar(&mut self) -> ScanResult {
        while self.match_char('$') {}
        let verbatim = self.match_char('@');
        if !self.match_char('"') {
            return Err("Unexpected character '$'");
        }
        if !verbatim && self.peek() == Some('"') && self.peek_nth(1) == Some('"') {
            // Raw interpolated strings end at the quote run, whatever their holes contain.
            let quotes = 1 + self.consume_quote_run();
            return self.raw_body(quotes);
        }
        self.interpolated_body(verbatim)
    }

    fn consume_quote_run(&mut self) -> usize {
        let mut n = 0;
        while self.match_char('"') {
            n += 1;
        }
        n
    }

    fn string_body(&mut self) -> ScanResult {
        loop {
            match self.peek() {
                None | Some('\n') => return Err("Unterminated string literal"),
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    pub(super) fn verbatim_body(&mut self) -> ScanResult {
        loop {
            match self.advance() {
                None => return Err("Unterminated verbatim string literal"),
                Some('"') => {
                    if !self.match_char('"') {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn raw_body(&mut self, quotes: usize) -> ScanResult {
        loop {
            match self.advance() {
                None => return Err("Unterminated raw string literal"),
                Some('"') => {
                    if 1 + self.consume_quote_run() >= quotes {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    pub(super) fn char_body(&mut self) -> ScanResult {
        loop {
            match self.peek() {
                None | Some('\n') => return Err("Unterminated character literal"),
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    pub(super) fn interpolated_body(&mut self, verbatim: bool) -> ScanResult {
        loop {
            match self.advance() {
                None => return Err("Unterminated interpolated string literal"),
                Some('\\') if !verbatim => {
                    self.advance();
                }
                Some('"') => {
                    if !(verbatim && self.match_char('"')) {
                        return Ok(());
                    }
                }
                Some('{') => {
                    if !self.match_char('{') {
                        self.interpolation_hole()?;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Skip an interpolation hole up to its closing `}`, stepping over nested literals.
    fn interpolation_hole(&mut self) -> ScanResult {
        let mut depth = 1usize;
        loop {
            match self.advance() {
                None => return Err("Unterminated interpolated string literal"),
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some('"') => self.quoted_after_quote()?,
                Some('\'') => self.char_body()?,
                Some('$') => self.interpolated_after_dollar()?,
                Some('@') if self.peek() == Some('"') => {
                    self.advance();
                    self.verbatim_body()?;
                }
                Some(_) => {}
            }
        }
    }
}
