/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its top-level `parse()` entrypoint and the [`ParseOutput`] it
/// produces.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// A parsed compilation unit plus the recoverable errors met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub unit: CompilationUnit,
    /// Recovered [`SyntaxErrorKind::Syntax`] errors; the offending declarations are absent from `unit`.
    pub diagnostics: Vec<SyntaxError>,
}

/// One item at namespace level.
enum NamespaceItem {
    Using(Spanned<UsingDirective>),
    Member(Spanned<NamespaceMember>),
    Skipped,
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at member boundaries
///   (`;` or a balanced `{ ... }` block at depth 0).
/// - Only running out of input inside an unterminated body is fatal.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
    /// Set once an unexpected-end-of-input error is recorded so enclosing bodies do not repeat it.
    eof_reported: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `stubgen_syntax::lexer` (terminated by `Eof`).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            eof_reported: false,
        }
    }

    /// Parse the entire token stream into a [`CompilationUnit`].
    ///
    /// ## Errors
    /// Returns every collected error if the input ended inside an unterminated body. Other syntax errors are
    /// recovered from and reported through [`ParseOutput::diagnostics`].
    pub fn parse(mut self) -> Result<ParseOutput, Vec<SyntaxError>> {
        if self.tokens.is_empty() {
            return Ok(ParseOutput {
                unit: CompilationUnit::default(),
                diagnostics: Vec::new(),
            });
        }

        let mut usings = Vec::new();
        let members = self.namespace_members(&mut usings, None);
        let unit = CompilationUnit { usings, members };

        if self.eof_reported {
            Err(self.errors)
        } else {
            Ok(ParseOutput {
                unit,
                diagnostics: self.errors,
            })
        }
    }
}
