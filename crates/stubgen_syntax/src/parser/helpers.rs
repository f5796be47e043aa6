/// Token-stream helpers, skipping and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, contextual keywords and punctuation
/// - Skipping balanced token runs (bodies, attributes, initializers)
/// - Error recovery (`record`, `synchronize_member`)
///
/// Most functions in this file are internal (`fn`) and are documented primarily
/// to aid maintenance and onboarding.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is an identifier spelling the given contextual keyword.
    fn check_contextual(&self, id: ContextualKeywordId) -> bool {
        self.peek().kind.is_contextual(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Build an error at the current token; end of input yields an unexpected-EOF error.
    fn error_here(&self, msg: &str) -> SyntaxError {
        if self.is_at_end() {
            SyntaxError::unexpected_eof(format!("{msg}, found end of input"), self.current_span())
        } else {
            SyntaxError::syntax(format!("{}, found {:?}", msg, self.peek().kind), self.current_span())
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Record an error, keeping at most one unexpected-end-of-input error.
    fn record(&mut self, error: SyntaxError) {
        if error.kind == SyntaxErrorKind::UnexpectedEof {
            if self.eof_reported {
                return;
            }
            self.eof_reported = true;
        }
        self.errors.push(error);
    }

    /// Record that input ended before the closing `}` of `what`.
    fn unterminated(&mut self, what: &str) {
        let error = SyntaxError::unexpected_eof(format!("Expected '}}' to close {what}"), self.current_span())
            .with_hint("check for a missing closing brace");
        self.record(error);
    }

    /// Skip to the end of the current member: past a `;` at depth 0, past a balanced `{ ... }` block, or up to
    /// (not including) the `}` that closes the enclosing body.
    fn synchronize_member(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            if depth == 0 && self.check_punct(PunctuationId::RBrace) {
                return;
            }
            let kind = self.advance().kind.punctuation_id();
            match kind {
                Some(PunctuationId::LBrace | PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.match_punct(PunctuationId::Semicolon);
                        return;
                    }
                }
                Some(PunctuationId::RParen | PunctuationId::RBracket) => depth = depth.saturating_sub(1),
                Some(PunctuationId::Semicolon) if depth == 0 => return,
                _ => {}
            }
        }
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Consume a balanced `open ... close` run starting at the current `open` token.
    fn skip_balanced(&mut self, open: PunctuationId, close: PunctuationId) -> Result<Span, SyntaxError> {
        let start = self.current_span();
        self.expect_punct(open, &format!("Expected '{}'", punctuation::as_str(open)))?;
        let mut depth = 1usize;
        loop {
            if self.is_at_end() {
                return Err(SyntaxError::unexpected_eof(
                    format!("Expected '{}' to match '{}'", punctuation::as_str(close), punctuation::as_str(open)),
                    start,
                ));
            }
            let kind = self.advance().kind.punctuation_id();
            if kind == Some(open) {
                depth += 1;
            } else if kind == Some(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(start.merge(self.previous_span()));
                }
            }
        }
    }

    /// Skip any number of `[...]` attribute sections.
    fn skip_attributes(&mut self) -> Result<(), SyntaxError> {
        while self.check_punct(PunctuationId::LBracket) {
            self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
        }
        Ok(())
    }

    /// Skip an expression up to and including the `;` that ends it.
    fn skip_to_semicolon(&mut self) -> Result<(), SyntaxError> {
        let mut depth = 0usize;
        loop {
            if self.is_at_end() {
                return Err(self.error_here("Expected ';'"));
            }
            match self.peek().kind.punctuation_id() {
                Some(PunctuationId::Semicolon) if depth == 0 => {
                    self.advance();
                    return Ok(());
                }
                Some(PunctuationId::RBrace) if depth == 0 => return Err(self.error_here("Expected ';'")),
                Some(PunctuationId::LBrace | PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RBrace | PunctuationId::RParen | PunctuationId::RBracket) => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip an initializer or default value up to (not including) the `,`, `;` or `)` that ends it.
    fn skip_until_list_separator(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().kind.punctuation_id() {
                Some(PunctuationId::Comma | PunctuationId::Semicolon) if depth == 0 => return,
                Some(PunctuationId::RParen | PunctuationId::RBrace | PunctuationId::RBracket) if depth == 0 => {
                    return;
                }
                Some(PunctuationId::LBrace | PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RBrace | PunctuationId::RParen | PunctuationId::RBracket) => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a method or constructor body: `{ ... }`, `=> expr;` or `;`.
    fn skip_member_body(&mut self) -> Result<(), SyntaxError> {
        if self.check_punct(PunctuationId::LBrace) {
            self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace)?;
            Ok(())
        } else if self.match_punct(PunctuationId::FatArrow) {
            self.skip_to_semicolon()
        } else if self.match_punct(PunctuationId::Semicolon) {
            Ok(())
        } else {
            Err(self.error_here("Expected member body"))
        }
    }

    /// Skip the rest of a member whose shape is not modelled (events, operators, indexers).
    fn skip_member_tail(&mut self) -> Result<(), SyntaxError> {
        loop {
            if self.is_at_end() {
                return Err(self.error_here("Expected ';' or '{'"));
            }
            match self.peek().kind.punctuation_id() {
                Some(PunctuationId::Semicolon) => {
                    self.advance();
                    return Ok(());
                }
                Some(PunctuationId::LBrace) => {
                    self.skip_balanced(PunctuationId::LBrace, PunctuationId::RBrace)?;
                    if self.match_punct(PunctuationId::Eq) {
                        return self.skip_to_semicolon();
                    }
                    self.match_punct(PunctuationId::Semicolon);
                    return Ok(());
                }
                Some(PunctuationId::FatArrow) => {
                    self.advance();
                    return self.skip_to_semicolon();
                }
                Some(PunctuationId::LParen) => {
                    self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
                }
                Some(PunctuationId::LBracket) => {
                    self.skip_balanced(PunctuationId::LBracket, PunctuationId::RBracket)?;
                }
                Some(PunctuationId::RBrace) => return Err(self.error_here("Expected ';' or '{'")),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip generic `where` constraint clauses, stopping at the body.
    fn skip_constraints(&mut self) -> Result<(), SyntaxError> {
        if !self.check_contextual(ContextualKeywordId::Where) {
            return Ok(());
        }
        loop {
            if self.is_at_end() {
                return Err(self.error_here("Expected body after constraints"));
            }
            match self.peek().kind.punctuation_id() {
                Some(PunctuationId::LBrace | PunctuationId::Semicolon | PunctuationId::FatArrow) => return Ok(()),
                Some(PunctuationId::LParen) => {
                    self.skip_balanced(PunctuationId::LParen, PunctuationId::RParen)?;
                }
                Some(PunctuationId::RBrace) => return Err(self.error_here("Expected body after constraints")),
                _ => {
                    self.advance();
                }
            }
        }
    }
}
