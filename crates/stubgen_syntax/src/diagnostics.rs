//! Syntax diagnostics.
//!
//! [`SyntaxError`] is both a `std::error::Error` (via `thiserror`) and a [`miette::Diagnostic`] carrying a
//! labelled span, so callers that still hold the source text can render it with context using [`render`].

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource};
use thiserror::Error;

use crate::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Malformed token (unterminated string or comment, stray character).
    Lexical,
    /// Recoverable grammar error; the parser skipped the offending declaration.
    Syntax,
    /// Input ended inside an unterminated body.
    UnexpectedEof,
}

impl SyntaxErrorKind {
    /// `true` if the parser could continue past this error.
    pub fn is_recoverable(self) -> bool {
        matches!(self, SyntaxErrorKind::Syntax)
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::Lexical => write!(f, "lexical error"),
            SyntaxErrorKind::Syntax => write!(f, "syntax error"),
            SyntaxErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub kind: SyntaxErrorKind,
    pub hints: Vec<String>,
}

impl SyntaxError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(SyntaxErrorKind::Lexical, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(SyntaxErrorKind::Syntax, message, span)
    }

    pub fn unexpected_eof(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(SyntaxErrorKind::UnexpectedEof, message, span)
    }

    fn with_kind(kind: SyntaxErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            SyntaxErrorKind::Lexical => "stubgen::lex",
            SyntaxErrorKind::Syntax => "stubgen::parse",
            SyntaxErrorKind::UnexpectedEof => "stubgen::eof",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() {
            None
        } else {
            Some(Box::new(self.hints.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.kind.to_string()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    let col = source[line_start..offset].chars().count() + 1;
    (line, col)
}

/// Render diagnostics against their source, one report per error, without ANSI colours.
///
/// Falls back to the single-line `Display` form if the graphical renderer fails.
pub fn render(file_name: &str, source: &str, errors: &[SyntaxError]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for error in errors {
        let report = miette::Report::new(error.clone())
            .with_source_code(NamedSource::new(file_name, source.to_string()));
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &*report).is_ok() {
            out.push_str(&rendered);
        } else {
            let (line, col) = line_col(source, error.span.start);
            out.push_str(&format!("{file_name}:{line}:{col}: {error}\n"));
        }
    }
    out
}
