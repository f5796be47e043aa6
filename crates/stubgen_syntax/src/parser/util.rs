/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers that don’t cleanly fit into
/// “decl”, “members” or “types” (identifier and dotted-name parsing).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_here("Expected identifier")),
        }
    }

    /// `Acme.Billing.Core`
    fn dotted_name(&mut self) -> Result<String, SyntaxError> {
        let mut name = self.identifier()?;
        while self.match_punct(PunctuationId::Dot) {
            name.push('.');
            name.push_str(&self.identifier()?);
        }
        Ok(name)
    }
}
